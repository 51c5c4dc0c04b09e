use super::halo::HaloState;
use super::highlight::apply_highlight;
use super::particles::ParticlePool;
use super::resolver::resolve_target;
use super::{SceneGraph, effective_severity};
use bevy::math::Vec3;
use common::{ScenarioProfile, profile_for};
use rand::Rng;

/// Per-frame inputs supplied by the surrounding application.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub scenario: &'a str,
    pub severity: f32,
    pub elapsed: f32,
    pub delta: f32,
}

/// State owned by the effects engine between frames.
///
/// Mounted for one scenario; the droplet pool is sized from the severity at
/// mount time and keeps that size until the scenario changes.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectsState {
    scenario: String,
    profile: ScenarioProfile,
    mounted_severity: f32,
    halo: HaloState,
    particles: Option<ParticlePool>,
}

impl EffectsState {
    pub fn mount<R: Rng + ?Sized>(scenario: &str, severity: f32, rng: &mut R) -> Self {
        let profile = profile_for(scenario);
        let mounted_severity = effective_severity(severity);
        let particles = profile
            .bleeding
            .then(|| ParticlePool::spawn(mounted_severity, rng));

        Self {
            scenario: scenario.to_string(),
            profile,
            mounted_severity,
            halo: HaloState::default(),
            particles,
        }
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn profile(&self) -> ScenarioProfile {
        self.profile
    }

    pub fn mounted_severity(&self) -> f32 {
        self.mounted_severity
    }

    /// Whether the halo and droplet stream are mounted.
    pub fn shows_bleeding(&self) -> bool {
        self.profile.bleeding
    }

    pub fn halo(&self) -> Option<&HaloState> {
        self.shows_bleeding().then_some(&self.halo)
    }

    pub fn particles(&self) -> Option<&ParticlePool> {
        self.particles.as_ref()
    }

    /// Emission anchor for the droplets: wherever the halo currently sits.
    pub fn anchor(&self) -> Vec3 {
        self.halo.translation
    }
}

/// What a frame step did, for logging and presentation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    /// The scenario differed from the mounted one and state was rebuilt.
    pub remounted: bool,
    pub target: Option<&'static str>,
    /// Intensity written to the target, when it had an emissive channel.
    pub intensity: Option<f32>,
    pub halo_tracked: bool,
}

/// Runs one frame of the effects engine.
///
/// Resolve the target region, pulse its emissive channel, then (for bleeding
/// scenarios) move the halo onto it and advance the droplets. A missing
/// region or material only skips the step that needs it.
pub fn step_effects<G, R>(
    state: &mut EffectsState,
    input: &FrameInput<'_>,
    graph: &mut G,
    rng: &mut R,
) -> FrameReport
where
    G: SceneGraph + ?Sized,
    R: Rng + ?Sized,
{
    let mut report = FrameReport::default();
    if state.scenario != input.scenario {
        *state = EffectsState::mount(input.scenario, input.severity, rng);
        report.remounted = true;
    }

    let severity = effective_severity(input.severity);
    let target = resolve_target(&state.scenario, graph);
    report.target = target.map(|resolved| resolved.name);
    report.intensity = target
        .and_then(|resolved| apply_highlight(graph, resolved.region, input.elapsed, severity));

    if !state.profile.bleeding {
        return report;
    }

    let target_position = target.and_then(|resolved| graph.world_position(resolved.region));
    report.halo_tracked = state
        .halo
        .track(target_position, input.elapsed, severity);

    if let Some(pool) = state.particles.as_mut() {
        pool.step(input.delta, severity, rng);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::halo::DEFAULT_HALO_POSITION;
    use crate::effects::highlight::BASE_INTENSITY;
    use crate::effects::test_scene::TestScene;
    use bevy::color::LinearRgba;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn input(scenario: &str, severity: f32, elapsed: f32) -> FrameInput<'_> {
        FrameInput {
            scenario,
            severity,
            elapsed,
            delta: 1.0 / 60.0,
        }
    }

    #[test]
    fn hemorrhage_mounts_halo_and_severity_sized_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = EffectsState::mount("hemorrhage", 2.0, &mut rng);
        assert!(state.shows_bleeding());
        assert_eq!(state.particles().map(ParticlePool::len), Some(24));
        assert_eq!(state.halo().map(|halo| halo.translation), Some(DEFAULT_HALO_POSITION));
    }

    #[test]
    fn non_bleeding_scenarios_mount_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        for scenario in ["stroke", "hypertension", "seizure", "earthquake"] {
            let state = EffectsState::mount(scenario, 3.0, &mut rng);
            assert!(state.particles().is_none(), "{scenario}");
            assert!(state.halo().is_none(), "{scenario}");
        }
    }

    #[test]
    fn stroke_pulses_the_brain() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut scene = TestScene::with_regions(&["Heart", "Brain"]);
        let mut state = EffectsState::mount("stroke", 3.0, &mut rng);

        let report = step_effects(&mut state, &input("stroke", 3.0, 0.0), &mut scene, &mut rng);

        assert_eq!(report.target, Some("Brain"));
        assert_eq!(report.intensity, Some(BASE_INTENSITY));
        assert_eq!(
            scene.region("Brain").emissive,
            Some((LinearRgba::RED, BASE_INTENSITY))
        );
        assert_eq!(scene.region("Heart").emissive, None);
        assert!(!report.halo_tracked);
    }

    #[test]
    fn hemorrhage_halo_follows_abdomen() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut scene = TestScene::with_regions(&["Abdomen"]);
        scene.region_mut("Abdomen").position = Vec3::new(0.0, 1.1, 0.2);
        let mut state = EffectsState::mount("hemorrhage", 2.0, &mut rng);

        let report = step_effects(&mut state, &input("hemorrhage", 2.0, 0.0), &mut scene, &mut rng);

        assert_eq!(report.target, Some("Abdomen"));
        assert!(report.halo_tracked);
        let halo = state.halo().unwrap();
        assert_eq!(halo.translation, Vec3::new(0.0, 1.1, 0.2));
        assert!((halo.scale - 1.0).abs() < 1e-6);
        assert_eq!(state.anchor(), Vec3::new(0.0, 1.1, 0.2));
    }

    #[test]
    fn unknown_scenario_touches_nothing() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut scene = TestScene::with_regions(&["Brain", "Abdomen", "Heart"]);
        let mut state = EffectsState::mount("earthquake", 1.0, &mut rng);

        for frame in 0..30 {
            let report = step_effects(
                &mut state,
                &input("earthquake", 1.0, frame as f32 / 60.0),
                &mut scene,
                &mut rng,
            );
            assert_eq!(report, FrameReport::default());
        }
        assert_eq!(scene.writes, 0);
    }

    #[test]
    fn placeholder_scene_keeps_default_halo_and_still_drips() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut scene = TestScene::with_regions(&["PlaceholderHead", "PlaceholderTorso"]);
        let mut state = EffectsState::mount("hemorrhage", 2.0, &mut rng);
        let initial = state.particles().unwrap().clone();

        for frame in 0..10 {
            let report = step_effects(
                &mut state,
                &input("hemorrhage", 2.0, frame as f32 / 60.0),
                &mut scene,
                &mut rng,
            );
            assert_eq!(report.target, None);
            assert!(!report.halo_tracked);
        }

        assert_eq!(state.anchor(), DEFAULT_HALO_POSITION);
        assert_ne!(state.particles().unwrap(), &initial);
        assert_eq!(scene.writes, 0);
    }

    #[test]
    fn halo_keeps_last_position_when_target_disappears() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut scene = TestScene::with_regions(&["Brain"]);
        scene.region_mut("Brain").position = Vec3::new(0.0, 1.7, 0.0);
        let mut state = EffectsState::mount("hemorrhage", 2.0, &mut rng);

        step_effects(&mut state, &input("hemorrhage", 2.0, 0.2), &mut scene, &mut rng);
        let tracked = *state.halo().unwrap();

        let mut empty = TestScene::default();
        step_effects(&mut state, &input("hemorrhage", 2.0, 0.4), &mut empty, &mut rng);
        assert_eq!(state.halo(), Some(&tracked));
    }

    #[test]
    fn scenario_change_remounts_with_new_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut scene = TestScene::default();
        let mut state = EffectsState::mount("stroke", 3.0, &mut rng);

        let report = step_effects(&mut state, &input("hemorrhage", 2.0, 0.0), &mut scene, &mut rng);
        assert!(report.remounted);
        assert_eq!(state.scenario(), "hemorrhage");
        assert_eq!(state.particles().map(ParticlePool::len), Some(24));

        let report = step_effects(&mut state, &input("hemorrhage", 2.0, 0.1), &mut scene, &mut rng);
        assert!(!report.remounted);
    }

    #[test]
    fn severity_change_keeps_pool_size() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut scene = TestScene::default();
        let mut state = EffectsState::mount("hemorrhage", 2.0, &mut rng);

        let report = step_effects(&mut state, &input("hemorrhage", 5.0, 0.0), &mut scene, &mut rng);
        assert!(!report.remounted);
        assert_eq!(state.particles().map(ParticlePool::len), Some(24));
        assert_eq!(state.mounted_severity(), 2.0);
    }

    #[test]
    fn negative_severity_degrades_to_static_glow() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut scene = TestScene::with_regions(&["Brain"]);
        let mut state = EffectsState::mount("hemorrhage", -2.0, &mut rng);
        assert_eq!(state.particles().map(ParticlePool::len), Some(12));

        for frame in 0..20 {
            let report = step_effects(
                &mut state,
                &input("hemorrhage", -2.0, frame as f32 * 0.3),
                &mut scene,
                &mut rng,
            );
            assert_eq!(report.intensity, Some(BASE_INTENSITY));
            assert!(state.halo().unwrap().scale > 0.0);
        }
    }
}
