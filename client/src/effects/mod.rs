//! Per-frame scenario effects engine.
//!
//! Everything here is plain data plus a [`SceneGraph`] capability trait, so
//! the whole frame step can run against an in-memory scene in tests. The
//! ECS adapter lives in `scene_runtime::scene_graph`.

pub mod frame;
pub mod halo;
pub mod highlight;
pub mod particles;
pub mod resolver;

use bevy::color::LinearRgba;
use bevy::math::Vec3;

pub use frame::{EffectsState, FrameInput, FrameReport, step_effects};
pub use halo::{DEFAULT_HALO_POSITION, HaloState, halo_scale};
pub use highlight::{apply_highlight, highlight_intensity};
pub use particles::{BleedParticle, ParticlePool, ParticleRanges, particle_opacity, pool_size};
pub use resolver::{ResolvedRegion, resolve_target};

/// Named-node access to the scene the effects decorate.
///
/// Regions are looked up by name every frame and never cached, so the graph
/// may be rebuilt between frames (model swap, placeholder fallback).
pub trait SceneGraph {
    type Region: Copy;

    fn find_region(&self, name: &str) -> Option<Self::Region>;

    fn world_position(&self, region: Self::Region) -> Option<Vec3>;

    /// Whether the region has at least one material with an emissive channel.
    fn has_emissive(&self, region: Self::Region) -> bool;

    fn set_emissive(&mut self, region: Self::Region, color: LinearRgba, intensity: f32);
}

/// Severity as the effects consume it: non-finite and negative inputs read as 0.
pub fn effective_severity(raw: f32) -> f32 {
    if raw.is_finite() { raw.max(0.0) } else { 0.0 }
}
