use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::app::plugins::{build_bevy_plugins, create_winit_settings};
use crate::scene_runtime::registration::{register_scene_presentation, register_scene_runtime};
use crate::settings::{SettingsPlugin, SettingsResource, ViewerSettings};
use crate::ui::HudPlugin;

pub fn configure_client_app(app: &mut App, startup_settings: &ViewerSettings) {
    app.insert_resource(SettingsResource::new(startup_settings.clone()))
        .add_plugins(build_bevy_plugins(startup_settings))
        .insert_resource(create_winit_settings(startup_settings))
        .add_plugins(bevy::diagnostic::FrameTimeDiagnosticsPlugin::default())
        .add_plugins(EguiPlugin::default())
        .add_plugins(SettingsPlugin)
        .add_plugins(HudPlugin);

    register_scene_runtime(app, startup_settings);
    register_scene_presentation(app);
}
