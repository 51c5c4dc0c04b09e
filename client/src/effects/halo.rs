use bevy::math::Vec3;
use bevy::transform::components::Transform;

/// Where the halo sits until a target region has been resolved once.
pub const DEFAULT_HALO_POSITION: Vec3 = Vec3::new(0.0, 1.0, 0.0);

const BASE_SCALE: f32 = 0.6;
const SCALE_PER_SEVERITY: f32 = 0.2;
const BREATH_AMPLITUDE: f32 = 0.15;
const BREATH_SPEED: f32 = 3.0;

/// `(0.6 + severity * 0.2) * (1 + 0.15 * sin(elapsed * 3))`.
///
/// The breathing term runs at a fixed rate; only the base size follows severity.
pub fn halo_scale(elapsed: f32, severity: f32) -> f32 {
    let base = BASE_SCALE + severity * SCALE_PER_SEVERITY;
    base * (1.0 + BREATH_AMPLITUDE * (elapsed * BREATH_SPEED).sin())
}

/// Transform of the translucent marker drawn around the affected region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaloState {
    pub translation: Vec3,
    pub scale: f32,
}

impl Default for HaloState {
    fn default() -> Self {
        Self {
            translation: DEFAULT_HALO_POSITION,
            scale: halo_scale(0.0, 0.0),
        }
    }
}

impl HaloState {
    /// Moves the halo onto `target` and refreshes its scale.
    ///
    /// Without a target the previous transform is kept as-is and `false` is
    /// returned.
    pub fn track(&mut self, target: Option<Vec3>, elapsed: f32, severity: f32) -> bool {
        let Some(position) = target else {
            return false;
        };

        self.translation = position;
        self.scale = halo_scale(elapsed, severity);
        true
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation).with_scale(Vec3::splat(self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_at_rest_follows_severity() {
        assert!((halo_scale(0.0, 2.0) - 1.0).abs() < 1e-6);
        assert!((halo_scale(0.0, 0.0) - 0.6).abs() < 1e-6);
        assert!((halo_scale(0.0, 3.0) - 1.2).abs() < 1e-6);
    }

    #[test]
    fn breathing_stays_within_fifteen_percent() {
        for step in 0..1_000 {
            let elapsed = step as f32 * 0.01;
            let scale = halo_scale(elapsed, 2.0);
            assert!((0.85 - 1e-5..=1.15 + 1e-5).contains(&scale), "{scale}");
        }
    }

    #[test]
    fn breathing_ignores_severity() {
        let elapsed = 0.4;
        let ratio_low = halo_scale(elapsed, 1.0) / halo_scale(0.0, 1.0);
        let ratio_high = halo_scale(elapsed, 5.0) / halo_scale(0.0, 5.0);
        assert!((ratio_low - ratio_high).abs() < 1e-5);
    }

    #[test]
    fn tracks_target_position() {
        let mut halo = HaloState::default();
        let target = Vec3::new(0.1, 1.2, -0.3);
        assert!(halo.track(Some(target), 0.0, 2.0));
        assert_eq!(halo.translation, target);
        assert!((halo.scale - 1.0).abs() < 1e-6);

        let moved = Vec3::new(0.5, 1.0, 0.0);
        halo.track(Some(moved), 0.0, 2.0);
        assert_eq!(halo.transform().translation, moved);
    }

    #[test]
    fn keeps_last_transform_without_target() {
        let mut halo = HaloState::default();
        halo.track(Some(Vec3::new(2.0, 0.5, 1.0)), 0.7, 2.0);
        let before = halo;
        assert!(!halo.track(None, 5.0, 3.0));
        assert_eq!(halo, before);
    }
}
