use crate::scene_runtime::components::{
    AnatomyModelRoot, PlaceholderPrimitive, PlaceholderRoot, RuntimeSceneEntity,
};
use crate::scene_runtime::model_loader::{SceneRootChoice, select_scene_root};
use crate::scene_runtime::state::AnatomyModel;
use bevy::prelude::*;

const PLACEHOLDER_HEAD_RADIUS: f32 = 0.25;
const PLACEHOLDER_HEAD_CENTER: Vec3 = Vec3::new(0.0, 1.6, 0.0);
const PLACEHOLDER_TORSO_SIZE: Vec3 = Vec3::new(0.6, 0.9, 0.3);
const PLACEHOLDER_TORSO_CENTER: Vec3 = Vec3::new(0.0, 0.95, 0.0);

/// Keeps exactly one drawable root: the model once it is ready, the
/// placeholder body until then or after a failed load.
pub fn sync_scene_root(
    mut commands: Commands,
    model: Res<AnatomyModel>,
    model_roots: Query<Entity, With<AnatomyModelRoot>>,
    placeholder_roots: Query<Entity, With<PlaceholderRoot>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    match select_scene_root(&model.status) {
        SceneRootChoice::Model(scene) => {
            if !model_roots.is_empty() {
                return;
            }
            for entity in &placeholder_roots {
                commands.entity(entity).despawn();
            }
            commands.spawn((
                RuntimeSceneEntity,
                AnatomyModelRoot,
                Name::new("AnatomyModel"),
                SceneRoot(scene),
                Transform::default(),
            ));
        }
        SceneRootChoice::Placeholder => {
            if !placeholder_roots.is_empty() || !model_roots.is_empty() {
                return;
            }
            spawn_placeholder_body(&mut commands, &mut meshes, &mut materials);
        }
    }
}

fn spawn_placeholder_body(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.8, 0.72, 0.66),
        perceptual_roughness: 0.8,
        ..default()
    });
    let head = meshes.add(Sphere::new(PLACEHOLDER_HEAD_RADIUS));
    let torso = meshes.add(Cuboid::from_size(PLACEHOLDER_TORSO_SIZE));

    commands
        .spawn((
            RuntimeSceneEntity,
            PlaceholderRoot,
            Name::new("PlaceholderBody"),
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                PlaceholderPrimitive::Sphere,
                Name::new("PlaceholderHead"),
                Mesh3d(head),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(PLACEHOLDER_HEAD_CENTER),
            ));
            parent.spawn((
                PlaceholderPrimitive::Box,
                Name::new("PlaceholderTorso"),
                Mesh3d(torso),
                MeshMaterial3d(material),
                Transform::from_translation(PLACEHOLDER_TORSO_CENTER),
            ));
        });
}
