use crate::scene_runtime::state::ScenarioSelection;
use bevy::prelude::*;
use bevy_egui::input::EguiWantsInput;
use common::Scenario;

const SCENARIO_KEYS: [(KeyCode, Scenario); 4] = [
    (KeyCode::Digit1, Scenario::Stroke),
    (KeyCode::Digit2, Scenario::Hemorrhage),
    (KeyCode::Digit3, Scenario::Hypertension),
    (KeyCode::Digit4, Scenario::Seizure),
];

pub fn select_scenario_with_keys(
    keys: Res<ButtonInput<KeyCode>>,
    egui_wants_input: Option<Res<EguiWantsInput>>,
    mut selection: ResMut<ScenarioSelection>,
) {
    if egui_wants_input.is_some_and(|wants| wants.wants_any_keyboard_input()) {
        return;
    }

    let Some((_, scenario)) = SCENARIO_KEYS
        .iter()
        .find(|(key, _)| keys.just_pressed(*key))
    else {
        return;
    };

    if selection.scenario != scenario.name() {
        selection.select(scenario.name());
    }
}
