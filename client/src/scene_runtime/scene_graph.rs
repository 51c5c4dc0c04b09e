use crate::effects::SceneGraph;
use crate::scene_runtime::components::EffectPrimitive;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use std::collections::VecDeque;

/// ECS view of the rendered anatomy as a name-addressable scene graph.
///
/// A region is the first entity carrying the requested `Name`. Its material
/// is every `StandardMaterial` on the region or its descendants, so named
/// glTF nodes whose mesh primitives sit one level down still light up.
#[derive(SystemParam)]
pub struct AnatomySceneGraph<'w, 's> {
    nodes: Query<
        'w,
        's,
        (Entity, &'static Name, &'static GlobalTransform),
        Without<EffectPrimitive>,
    >,
    children: Query<'w, 's, &'static Children>,
    mesh_materials: Query<'w, 's, &'static MeshMaterial3d<StandardMaterial>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
}

impl AnatomySceneGraph<'_, '_> {
    fn subtree_materials(&self, region: Entity) -> Vec<AssetId<StandardMaterial>> {
        let mut found = Vec::new();
        let mut queue = VecDeque::from([region]);
        while let Some(entity) = queue.pop_front() {
            if let Ok(material) = self.mesh_materials.get(entity) {
                if !found.contains(&material.0.id()) {
                    found.push(material.0.id());
                }
            }
            if let Ok(children) = self.children.get(entity) {
                queue.extend(children.iter());
            }
        }
        found
    }
}

impl SceneGraph for AnatomySceneGraph<'_, '_> {
    type Region = Entity;

    fn find_region(&self, name: &str) -> Option<Entity> {
        self.nodes
            .iter()
            .find(|(_, node_name, _)| node_name.as_str() == name)
            .map(|(entity, _, _)| entity)
    }

    fn world_position(&self, region: Entity) -> Option<Vec3> {
        self.nodes
            .get(region)
            .ok()
            .map(|(_, _, transform)| transform.translation())
    }

    fn has_emissive(&self, region: Entity) -> bool {
        self.subtree_materials(region)
            .into_iter()
            .any(|id| self.materials.contains(id))
    }

    // glTF materials are shared between meshes, so every user of the
    // material glows with the region.
    fn set_emissive(&mut self, region: Entity, color: LinearRgba, intensity: f32) {
        let emissive = LinearRgba::rgb(
            color.red * intensity,
            color.green * intensity,
            color.blue * intensity,
        );
        for id in self.subtree_materials(region) {
            if let Some(material) = self.materials.get_mut(id) {
                material.emissive = emissive;
            }
        }
    }
}
