use super::SceneGraph;
use bevy::color::LinearRgba;

/// Emissive color written to the highlighted region.
pub const ALERT_COLOR: LinearRgba = LinearRgba::RED;
/// Floor of the pulse; an active region is never fully dark.
pub const BASE_INTENSITY: f32 = 0.2;
pub const PULSE_AMPLITUDE: f32 = 0.8;

/// `0.2 + 0.8 * |sin(elapsed * severity)|`, always within `[0.2, 1.0]`.
pub fn highlight_intensity(elapsed: f32, severity: f32) -> f32 {
    let phase = elapsed * severity;
    if !phase.is_finite() {
        return BASE_INTENSITY;
    }
    BASE_INTENSITY + PULSE_AMPLITUDE * phase.sin().abs()
}

/// Pulses the region's emissive channel. Returns the written intensity, or
/// `None` when the region has nothing to write to.
pub fn apply_highlight<G>(
    graph: &mut G,
    region: G::Region,
    elapsed: f32,
    severity: f32,
) -> Option<f32>
where
    G: SceneGraph + ?Sized,
{
    if !graph.has_emissive(region) {
        return None;
    }

    let intensity = highlight_intensity(elapsed, severity);
    graph.set_emissive(region, ALERT_COLOR, intensity);
    Some(intensity)
}
