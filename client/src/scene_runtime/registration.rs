use crate::scene_runtime::model_loader::{poll_anatomy_model, request_anatomy_model};
use crate::scene_runtime::pipeline::SceneRenderPipeline;
use crate::scene_runtime::state::{
    AnatomyModel, EffectsRuntime, ScenarioSelection, VitalsReadout,
};
use crate::scene_runtime::systems::{
    EffectMeshes, advance_scenario_effects, refresh_vitals_readout, select_scenario_with_keys,
    spawn_orbit_camera, spawn_scene_lighting, sync_effect_primitives, sync_scene_root,
    update_orbit_camera,
};
use crate::settings::ViewerSettings;
use bevy::prelude::*;

/// Registers model loading, scene fallback, the effects engine and the
/// vitals readout. Runs headless: nothing here reads window input.
pub fn register_scene_runtime(app: &mut App, settings: &ViewerSettings) {
    let selection = ScenarioSelection::new(&settings.scene.initial_scenario);
    let effects = EffectsRuntime::new(&selection, settings.effects.rng_seed);

    app.insert_resource(AnatomyModel::new(settings.scene.model_path.clone()))
        .insert_resource(selection)
        .insert_resource(effects)
        .init_resource::<EffectMeshes>()
        .init_resource::<VitalsReadout>()
        .configure_sets(
            Update,
            (
                SceneRenderPipeline::Input,
                SceneRenderPipeline::Load,
                SceneRenderPipeline::Spawn,
                SceneRenderPipeline::Simulate,
                SceneRenderPipeline::Present,
                SceneRenderPipeline::Camera,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (request_anatomy_model, poll_anatomy_model)
                .chain()
                .in_set(SceneRenderPipeline::Load),
        )
        .add_systems(Update, sync_scene_root.in_set(SceneRenderPipeline::Spawn))
        .add_systems(
            Update,
            (advance_scenario_effects, refresh_vitals_readout)
                .in_set(SceneRenderPipeline::Simulate),
        )
        .add_systems(
            Update,
            sync_effect_primitives.in_set(SceneRenderPipeline::Present),
        );
}

/// Camera, lights and keyboard controls for the windowed viewer.
pub fn register_scene_presentation(app: &mut App) {
    app.add_systems(Startup, (spawn_scene_lighting, spawn_orbit_camera))
        .add_systems(
            Update,
            select_scenario_with_keys.in_set(SceneRenderPipeline::Input),
        )
        .add_systems(
            Update,
            update_orbit_camera.in_set(SceneRenderPipeline::Camera),
        );
}
