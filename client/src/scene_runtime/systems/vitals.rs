use crate::scene_runtime::state::{ScenarioSelection, VitalsReadout};
use bevy::prelude::*;

pub fn refresh_vitals_readout(
    selection: Res<ScenarioSelection>,
    mut readout: ResMut<VitalsReadout>,
) {
    if readout.scenario == selection.scenario && !readout.series.is_empty() {
        return;
    }

    *readout = VitalsReadout::for_scenario(&selection.scenario);
    if let Some((blood_pressure, heart_rate, oxygen)) = readout.series.last() {
        debug!(
            "Vitals for '{}': BP {:.1} mmHg, HR {:.1} bpm, O2 {:.1}%",
            readout.scenario, blood_pressure, heart_rate, oxygen
        );
    }
}
