use bevy::prelude::*;

use physiosim::effects::DEFAULT_HALO_POSITION;
use physiosim::scene_runtime::components::{
    AnatomyModelRoot, BleedDroplet, EffectPrimitive, HaloMarker, PlaceholderPrimitive,
};
use physiosim::scene_runtime::registration::register_scene_runtime;
use physiosim::scene_runtime::state::{AnatomyModel, EffectsRuntime, ScenarioSelection};
use physiosim::settings::ViewerSettings;

fn settings_for(scenario: &str) -> ViewerSettings {
    let mut settings = ViewerSettings::default();
    settings.scene.model_path = "models/__missing_anatomy__.glb".to_string();
    settings.scene.initial_scenario = scenario.to_string();
    settings.effects.rng_seed = Some(11);
    settings
}

fn headless_app(scenario: &str) -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        bevy::asset::AssetPlugin::default(),
        bevy::transform::TransformPlugin,
    ))
    .init_asset::<Mesh>()
    .init_asset::<StandardMaterial>()
    .init_asset::<Scene>();
    register_scene_runtime(&mut app, &settings_for(scenario));
    app
}

fn spawn_region(app: &mut App, name: &'static str, position: Vec3) -> Handle<StandardMaterial> {
    let material = app
        .world_mut()
        .resource_mut::<Assets<StandardMaterial>>()
        .add(StandardMaterial::default());
    app.world_mut().spawn((
        Name::new(name),
        Transform::from_translation(position),
        MeshMaterial3d(material.clone()),
    ));
    material
}

fn emissive(app: &App, material: &Handle<StandardMaterial>) -> LinearRgba {
    app.world()
        .resource::<Assets<StandardMaterial>>()
        .get(material)
        .map(|material| material.emissive)
        .unwrap_or(LinearRgba::NONE)
}

fn count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<(), F>()
        .iter(app.world())
        .count()
}

#[test]
fn missing_model_falls_back_to_sphere_and_box() {
    let mut app = headless_app("stroke");
    app.update();
    app.update();

    assert!(app.world().resource::<AnatomyModel>().failure().is_some());
    assert_eq!(count::<With<AnatomyModelRoot>>(&mut app), 0);

    let mut primitives = app
        .world_mut()
        .query::<&PlaceholderPrimitive>()
        .iter(app.world())
        .copied()
        .collect::<Vec<_>>();
    primitives.sort_by_key(|primitive| *primitive == PlaceholderPrimitive::Box);
    assert_eq!(
        primitives,
        vec![PlaceholderPrimitive::Sphere, PlaceholderPrimitive::Box]
    );
}

#[test]
fn hemorrhage_on_placeholder_drips_from_default_anchor() {
    let mut app = headless_app("hemorrhage");
    for _ in 0..3 {
        app.update();
    }

    assert_eq!(count::<With<HaloMarker>>(&mut app), 1);
    assert_eq!(count::<With<BleedDroplet>>(&mut app), 24);

    let halo = app
        .world_mut()
        .query_filtered::<&Transform, With<HaloMarker>>()
        .single(app.world())
        .map(|transform| transform.translation);
    assert_eq!(halo.ok(), Some(DEFAULT_HALO_POSITION));
    assert_eq!(app.world().resource::<EffectsRuntime>().last_report.target, None);
}

#[test]
fn abdomen_region_glows_and_pulls_the_halo() {
    let mut app = headless_app("hemorrhage");
    let abdomen_position = Vec3::new(0.3, 1.1, 0.1);
    let abdomen = spawn_region(&mut app, "Abdomen", abdomen_position);

    // The first frame runs before transform propagation.
    app.update();
    app.update();

    let runtime = app.world().resource::<EffectsRuntime>();
    assert_eq!(runtime.last_report.target, Some("Abdomen"));
    assert!(runtime.last_report.halo_tracked);

    let glow = emissive(&app, &abdomen);
    assert!(glow.red > 0.0);
    assert_eq!(glow.green, 0.0);
    assert_eq!(glow.blue, 0.0);

    let halo = app
        .world_mut()
        .query_filtered::<&Transform, With<HaloMarker>>()
        .single(app.world())
        .map(|transform| transform.translation);
    let halo = halo.unwrap_or(Vec3::NAN);
    assert!(halo.distance(abdomen_position) < 1e-5, "halo at {halo}");
}

#[test]
fn brain_material_on_child_mesh_is_highlighted() {
    let mut app = headless_app("stroke");
    let material = app
        .world_mut()
        .resource_mut::<Assets<StandardMaterial>>()
        .add(StandardMaterial::default());
    let brain = app
        .world_mut()
        .spawn((Name::new("Brain"), Transform::from_xyz(0.0, 1.7, 0.0)))
        .id();
    app.world_mut().spawn((
        Name::new("Brain_primitive0"),
        Transform::default(),
        MeshMaterial3d(material.clone()),
        ChildOf(brain),
    ));

    app.update();

    assert_eq!(
        app.world().resource::<EffectsRuntime>().last_report.target,
        Some("Brain")
    );
    assert!(emissive(&app, &material).red > 0.0);
    assert_eq!(count::<With<EffectPrimitive>>(&mut app), 0);
}

#[test]
fn unknown_event_leaves_scene_untouched() {
    let mut app = headless_app("earthquake");
    let regions = [
        spawn_region(&mut app, "Brain", Vec3::new(0.0, 1.7, 0.0)),
        spawn_region(&mut app, "Heart", Vec3::new(0.1, 1.3, 0.1)),
        spawn_region(&mut app, "Abdomen", Vec3::new(0.0, 1.0, 0.1)),
    ];

    for _ in 0..5 {
        app.update();
    }

    for material in &regions {
        assert_eq!(emissive(&app, material), StandardMaterial::default().emissive);
    }
    assert_eq!(count::<With<EffectPrimitive>>(&mut app), 0);
    assert_eq!(app.world().resource::<EffectsRuntime>().last_report.target, None);
}

#[test]
fn scenario_change_rebuilds_effect_entities() {
    let mut app = headless_app("hemorrhage");
    app.update();
    assert_eq!(count::<With<BleedDroplet>>(&mut app), 24);

    app.world_mut()
        .resource_mut::<ScenarioSelection>()
        .select("stroke");
    app.update();
    app.update();
    assert_eq!(count::<With<EffectPrimitive>>(&mut app), 0);

    {
        let mut selection = app.world_mut().resource_mut::<ScenarioSelection>();
        selection.select("hemorrhage");
        selection.set_severity(3.0);
    }
    app.update();
    app.update();
    assert_eq!(count::<With<HaloMarker>>(&mut app), 1);
    assert_eq!(count::<With<BleedDroplet>>(&mut app), 36);
}

#[test]
fn severity_change_keeps_mounted_droplets() {
    let mut app = headless_app("hemorrhage");
    app.update();

    app.world_mut()
        .resource_mut::<ScenarioSelection>()
        .set_severity(4.0);
    app.update();
    app.update();

    assert_eq!(count::<With<BleedDroplet>>(&mut app), 24);
    assert_eq!(
        app.world().resource::<EffectsRuntime>().state.mounted_severity(),
        2.0
    );
}
