use crate::scene_runtime::components::RuntimeSceneEntity;
use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

const AMBIENT_BRIGHTNESS: f32 = 300.0;
const KEY_LIGHT_ILLUMINANCE: f32 = 5000.0;
const KEY_LIGHT_ORIGIN: Vec3 = Vec3::new(5.0, 5.0, 5.0);

/// Dim ambient fill plus one directional key light aimed at the body.
pub fn spawn_scene_lighting(mut commands: Commands, mut ambient_light: ResMut<GlobalAmbientLight>) {
    ambient_light.color = Color::WHITE;
    ambient_light.brightness = AMBIENT_BRIGHTNESS;
    ambient_light.affects_lightmapped_meshes = true;

    commands.spawn((
        RuntimeSceneEntity,
        Name::new("KeyLight"),
        DirectionalLight {
            illuminance: KEY_LIGHT_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(KEY_LIGHT_ORIGIN).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
