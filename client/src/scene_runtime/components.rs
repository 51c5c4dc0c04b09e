use bevy::prelude::*;

/// Marker applied to every entity owned by the runtime scene lifecycle.
#[derive(Component)]
pub struct RuntimeSceneEntity;

// ============================================================================
// SCENE ROOT COMPONENTS
// ============================================================================

/// Root of the loaded anatomy GLB scene.
#[derive(Component)]
pub struct AnatomyModelRoot;

/// Root of the procedural stand-in shown while the model is unavailable.
#[derive(Component)]
pub struct PlaceholderRoot;

#[derive(Component, Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaceholderPrimitive {
    Sphere,
    Box,
}

// ============================================================================
// EFFECT COMPONENTS
// ============================================================================

/// Any entity spawned by the effects layer. Despawned on remount and never
/// treated as an anatomical region.
#[derive(Component)]
pub struct EffectPrimitive;

#[derive(Component)]
pub struct HaloMarker;

/// Renders the droplet at `index` in the mounted particle pool.
#[derive(Component, Clone, Copy, Debug, Eq, PartialEq)]
pub struct BleedDroplet {
    pub index: usize,
}

// ============================================================================
// CAMERA COMPONENTS
// ============================================================================

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub yaw_speed: f32,
    pub pitch_speed: f32,
    pub zoom_speed: f32,
}
