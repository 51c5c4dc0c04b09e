use crate::effects::{EffectsState, FrameReport};
use bevy::prelude::*;
use common::severity_for;
use common::vitals::{self, VitalsSeries};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Scenario currently driving the effects layer.
///
/// Kept as free text so typed events outside the scenario table reach the
/// engine unchanged and render nothing.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ScenarioSelection {
    pub scenario: String,
    pub severity: f32,
}

impl ScenarioSelection {
    pub fn new(scenario: &str) -> Self {
        let scenario = scenario.trim();
        Self {
            scenario: scenario.to_string(),
            severity: severity_for(scenario),
        }
    }

    /// Switches scenario and resets severity from the scenario table.
    /// Returns `false` when the identifier is already selected.
    pub fn select(&mut self, scenario: &str) -> bool {
        let scenario = scenario.trim();
        if self.scenario == scenario {
            return false;
        }
        *self = Self::new(scenario);
        true
    }

    pub fn set_severity(&mut self, severity: f32) {
        if severity.is_finite() {
            self.severity = severity.max(0.0);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModelStatus {
    Unrequested,
    Loading(Handle<Scene>),
    Ready(Handle<Scene>),
    Failed(String),
}

/// Load state of the anatomy GLB.
#[derive(Resource, Debug, Clone)]
pub struct AnatomyModel {
    pub path: String,
    pub status: ModelStatus,
}

impl AnatomyModel {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: ModelStatus::Unrequested,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.status, ModelStatus::Ready(_))
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.status {
            ModelStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Effects engine state plus its random source.
#[derive(Resource)]
pub struct EffectsRuntime {
    pub state: EffectsState,
    pub rng: StdRng,
    pub last_report: FrameReport,
    /// Bumped on every remount so presentation can rebuild its entities.
    pub generation: u64,
}

impl EffectsRuntime {
    pub fn new(selection: &ScenarioSelection, rng_seed: Option<u64>) -> Self {
        let mut rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = EffectsState::mount(&selection.scenario, selection.severity, &mut rng);

        Self {
            state,
            rng,
            last_report: FrameReport::default(),
            generation: 0,
        }
    }
}

/// Vitals series for the selected scenario, recomputed on selection change.
#[derive(Resource, Debug, Clone, Default)]
pub struct VitalsReadout {
    pub scenario: String,
    pub series: VitalsSeries,
    pub summary: String,
}

impl VitalsReadout {
    pub fn for_scenario(scenario: &str) -> Self {
        let series = vitals::simulate(scenario);
        let summary = vitals::explain(scenario, &series);
        Self {
            scenario: scenario.to_string(),
            series,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_maps_severity_from_table() {
        assert_eq!(ScenarioSelection::new("stroke").severity, 3.0);
        assert_eq!(ScenarioSelection::new(" hemorrhage ").scenario, "hemorrhage");
        assert_eq!(ScenarioSelection::new("earthquake").severity, 1.0);
    }

    #[test]
    fn select_resets_severity_only_on_change() {
        let mut selection = ScenarioSelection::new("hemorrhage");
        selection.set_severity(4.5);
        assert!(!selection.select("hemorrhage"));
        assert_eq!(selection.severity, 4.5);

        assert!(selection.select("hypertension"));
        assert_eq!(selection.severity, 1.0);
    }

    #[test]
    fn set_severity_rejects_non_finite_and_negative() {
        let mut selection = ScenarioSelection::new("stroke");
        selection.set_severity(f32::NAN);
        assert_eq!(selection.severity, 3.0);
        selection.set_severity(-1.0);
        assert_eq!(selection.severity, 0.0);
    }

    #[test]
    fn seeded_runtime_is_reproducible() {
        let selection = ScenarioSelection::new("hemorrhage");
        let first = EffectsRuntime::new(&selection, Some(7));
        let second = EffectsRuntime::new(&selection, Some(7));
        assert_eq!(first.state, second.state);
        assert_eq!(first.state.particles().map(|pool| pool.len()), Some(24));
    }

    #[test]
    fn vitals_readout_carries_summary() {
        let readout = VitalsReadout::for_scenario("hemorrhage");
        assert_eq!(readout.series.len(), vitals::SAMPLE_COUNT);
        assert!(readout.summary.starts_with("Blood loss"));
    }
}
