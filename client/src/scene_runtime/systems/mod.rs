mod camera;
mod effects;
mod lighting;
mod model;
mod selection;
mod vitals;

pub use camera::{apply_orbit_transform, spawn_orbit_camera, update_orbit_camera};
pub use effects::{EffectMeshes, advance_scenario_effects, sync_effect_primitives};
pub use lighting::spawn_scene_lighting;
pub use model::sync_scene_root;
pub use selection::select_scenario_with_keys;
pub use vitals::refresh_vitals_readout;
