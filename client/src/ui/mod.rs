use crate::scene_runtime::state::{
    AnatomyModel, EffectsRuntime, ModelStatus, ScenarioSelection, VitalsReadout,
};
use crate::settings::{
    self, FpsLimitSetting, ResolutionSetting, SettingsResource, ViewerSettings, WindowModeSetting,
};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};
use common::Scenario;

const MAX_SEVERITY: f32 = 5.0;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudUiState>()
            .add_systems(Update, toggle_settings_modal_with_escape)
            .add_systems(EguiPrimaryContextPass, draw_hud_egui);
    }
}

#[derive(Resource, Default)]
struct HudUiState {
    event_text: String,
    settings_open: bool,
    draft: ViewerSettings,
}

fn toggle_settings_modal_with_escape(
    keys: Res<ButtonInput<KeyCode>>,
    settings_resource: Res<SettingsResource>,
    mut hud_state: ResMut<HudUiState>,
) {
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }

    if !hud_state.settings_open {
        hud_state.draft = settings_resource.current.clone();
    }

    hud_state.settings_open = !hud_state.settings_open;
}

fn draw_hud_egui(
    mut contexts: EguiContexts,
    mut hud_state: ResMut<HudUiState>,
    mut settings_resource: ResMut<SettingsResource>,
    mut selection: ResMut<ScenarioSelection>,
    runtime: Res<EffectsRuntime>,
    model: Res<AnatomyModel>,
    vitals: Res<VitalsReadout>,
    mut theme_initialized: Local<bool>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    if !*theme_initialized {
        apply_hud_theme(ctx);
        *theme_initialized = true;
    }

    draw_scenario_panel(
        ctx,
        &mut hud_state,
        &mut selection,
        &runtime,
        &model,
        &vitals,
    );

    if hud_state.settings_open {
        draw_settings_modal(ctx, &mut hud_state, &mut settings_resource);
    }
}

fn apply_hud_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(10.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 8.0);
    style.spacing.window_margin = egui::Margin::same(14);
    style.visuals.window_corner_radius = egui::CornerRadius::same(12);
    style.visuals.menu_corner_radius = egui::CornerRadius::same(10);
    ctx.set_style(style);
}

fn draw_scenario_panel(
    ctx: &egui::Context,
    hud_state: &mut HudUiState,
    selection: &mut ResMut<ScenarioSelection>,
    runtime: &EffectsRuntime,
    model: &AnatomyModel,
    vitals: &VitalsReadout,
) {
    egui::Window::new("PhysioSim XR")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .collapsible(true)
        .resizable(false)
        .default_width(340.0)
        .show(ctx, |ui| {
            let known = Scenario::from_name(&selection.scenario);
            egui::ComboBox::from_label("Scenario")
                .selected_text(known.map_or("Custom event", |scenario| scenario.label()))
                .show_ui(ui, |ui| {
                    for scenario in Scenario::ALL {
                        if ui
                            .selectable_label(known == Some(scenario), scenario.label())
                            .clicked()
                            && known != Some(scenario)
                        {
                            selection.select(scenario.name());
                        }
                    }
                });

            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut hud_state.event_text)
                        .desired_width(220.0)
                        .hint_text("Type an event (e.g. 'earthquake')"),
                );
                let submitted =
                    response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
                if (ui.button("Run").clicked() || submitted)
                    && !hud_state.event_text.trim().is_empty()
                    && selection.scenario != hud_state.event_text.trim()
                {
                    selection.select(&hud_state.event_text);
                }
            });

            let mut severity = selection.severity;
            if ui
                .add(egui::Slider::new(&mut severity, 0.0..=MAX_SEVERITY).text("Severity"))
                .changed()
            {
                selection.set_severity(severity);
            }

            ui.separator();
            ui.label(format!("Scenario: {}", selection.scenario));
            ui.label(format!("Severity: {:.1}", selection.severity));
            ui.label(format!(
                "Region: {}",
                runtime.last_report.target.unwrap_or("none")
            ));
            if let Some(pool) = runtime.state.particles() {
                ui.label(format!("Droplets: {}", pool.len()));
            }
            ui.label(format!("Model: {}", model_status_label(model)));

            ui.separator();
            if let Some((blood_pressure, heart_rate, oxygen)) = vitals.series.last() {
                ui.label(format!(
                    "BP {blood_pressure:.1} mmHg | HR {heart_rate:.1} bpm | O\u{2082} {oxygen:.1}%"
                ));
            }
            ui.label(egui::RichText::new(&vitals.summary).italics());
            ui.small("1-4 select scenario | A/D W/S orbit | wheel zoom | Esc settings");
        });
}

fn model_status_label(model: &AnatomyModel) -> String {
    match &model.status {
        ModelStatus::Unrequested | ModelStatus::Loading(_) => "loading (placeholder)".to_string(),
        ModelStatus::Ready(_) => model.path.clone(),
        ModelStatus::Failed(reason) => format!("placeholder ({reason})"),
    }
}

fn draw_settings_modal(
    ctx: &egui::Context,
    hud_state: &mut HudUiState,
    settings_resource: &mut SettingsResource,
) {
    let mut window_open = hud_state.settings_open;
    let mut should_apply = false;
    let mut should_close = false;

    egui::Window::new("Settings")
        .open(&mut window_open)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .collapsible(false)
        .resizable(false)
        .movable(false)
        .default_width(420.0)
        .show(ctx, |ui| {
            draw_graphics_settings(ui, &mut hud_state.draft);

            ui.separator();
            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    should_apply = ui.button("Apply").clicked();
                    should_close = ui.button("Close").clicked();
                });
            });
        });

    if should_apply {
        settings_resource.current.graphics = hud_state.draft.graphics.clone();
        if let Err(error) = settings_resource.save_to_disk() {
            warn!(
                "Failed to save settings file '{}': {}",
                settings::SETTINGS_FILE_PATH,
                error
            );
        }
    }

    if should_close {
        window_open = false;
    }

    if !window_open {
        hud_state.draft = settings_resource.current.clone();
    }
    hud_state.settings_open = window_open;
}

fn draw_graphics_settings(ui: &mut egui::Ui, draft: &mut ViewerSettings) {
    egui::ComboBox::from_label("Window mode")
        .selected_text(draft.graphics.window_mode.label())
        .show_ui(ui, |ui| {
            for option in WindowModeSetting::ALL {
                ui.selectable_value(&mut draft.graphics.window_mode, option, option.label());
            }
        });

    egui::ComboBox::from_label("Resolution")
        .selected_text(draft.graphics.resolution.label())
        .show_ui(ui, |ui| {
            for option in ResolutionSetting::presets() {
                ui.selectable_value(&mut draft.graphics.resolution, *option, option.label());
            }
        });

    egui::ComboBox::from_label("FPS limit")
        .selected_text(draft.graphics.fps_limit.label())
        .show_ui(ui, |ui| {
            for option in FpsLimitSetting::ALL {
                ui.selectable_value(&mut draft.graphics.fps_limit, option, option.label());
            }
        });

    ui.checkbox(&mut draft.graphics.vsync, "VSync");
}
