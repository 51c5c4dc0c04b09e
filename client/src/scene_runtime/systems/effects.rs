use crate::effects::{EffectsState, FrameInput, effective_severity, pool_size, step_effects};
use crate::scene_runtime::components::{
    BleedDroplet, EffectPrimitive, HaloMarker, RuntimeSceneEntity,
};
use crate::scene_runtime::scene_graph::AnatomySceneGraph;
use crate::scene_runtime::state::{EffectsRuntime, ScenarioSelection};
use bevy::light::NotShadowCaster;
use bevy::prelude::*;
use common::Scenario;

/// Unit halo radius; the halo controller scales it per frame.
const HALO_RADIUS: f32 = 0.15;
const HALO_COLOR: Color = Color::srgba(1.0, 0.0, 0.0, 0.35);
const DROPLET_RADIUS: f32 = 0.012;
const DROPLET_COLOR: Color = Color::srgb(0.75, 0.0, 0.0);

/// Shared meshes for effect primitives, created on first use.
#[derive(Resource, Default)]
pub struct EffectMeshes {
    halo: Option<Handle<Mesh>>,
    droplet: Option<Handle<Mesh>>,
}

/// Runs one frame of the effects engine against the rendered anatomy.
pub fn advance_scenario_effects(
    time: Res<Time>,
    selection: Res<ScenarioSelection>,
    mut runtime: ResMut<EffectsRuntime>,
    mut graph: AnatomySceneGraph,
    mut logged_generation: Local<Option<u64>>,
) {
    let runtime = &mut *runtime;
    let input = FrameInput {
        scenario: &selection.scenario,
        severity: selection.severity,
        elapsed: time.elapsed_secs(),
        delta: time.delta_secs(),
    };
    let report = step_effects(&mut runtime.state, &input, &mut graph, &mut runtime.rng);

    if report.remounted {
        runtime.generation += 1;
    }

    if *logged_generation != Some(runtime.generation) {
        log_mount(&runtime.state);
        *logged_generation = Some(runtime.generation);
    } else if selection.is_changed() {
        log_unapplied_severity(&runtime.state, selection.severity);
    }

    if report.target != runtime.last_report.target {
        match report.target {
            Some(region) => info!("Highlighting region '{}'", region),
            None => debug!(
                "No region of '{}' present in the scene",
                runtime.state.scenario()
            ),
        }
    }

    runtime.last_report = report;
}

fn log_mount(state: &EffectsState) {
    if Scenario::from_name(state.scenario()).is_none() {
        warn!(
            "Unknown scenario '{}'; no region will be highlighted",
            state.scenario()
        );
        return;
    }

    match state.particles() {
        Some(pool) => info!(
            "Mounted '{}' effects at severity {:.1} with {} droplets",
            state.scenario(),
            state.mounted_severity(),
            pool.len()
        ),
        None => info!(
            "Mounted '{}' effects at severity {:.1}",
            state.scenario(),
            state.mounted_severity()
        ),
    }
}

fn log_unapplied_severity(state: &EffectsState, severity: f32) {
    let Some(pool) = state.particles() else {
        return;
    };
    let wanted = pool_size(effective_severity(severity));
    if wanted != pool.len() {
        info!(
            "Severity {:.1} keeps the mounted stream of {} droplets (would be {})",
            severity,
            pool.len(),
            wanted
        );
    }
}

/// Mirrors the engine state onto halo and droplet entities.
///
/// Entities are rebuilt whenever the engine remounts; otherwise only their
/// transforms and droplet opacity are refreshed.
pub fn sync_effect_primitives(
    mut commands: Commands,
    runtime: Res<EffectsRuntime>,
    mut effect_meshes: ResMut<EffectMeshes>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    spawned: Query<(Entity, &MeshMaterial3d<StandardMaterial>), With<EffectPrimitive>>,
    mut halos: Query<&mut Transform, (With<HaloMarker>, Without<BleedDroplet>)>,
    mut droplets: Query<
        (&BleedDroplet, &mut Transform, &MeshMaterial3d<StandardMaterial>),
        Without<HaloMarker>,
    >,
    mut synced_generation: Local<Option<u64>>,
) {
    let state = &runtime.state;

    if *synced_generation != Some(runtime.generation) {
        for (entity, material) in &spawned {
            materials.remove(&material.0);
            commands.entity(entity).despawn();
        }
        spawn_effect_primitives(
            &mut commands,
            state,
            &mut effect_meshes,
            &mut meshes,
            &mut materials,
        );
        *synced_generation = Some(runtime.generation);
        return;
    }

    if let Some(halo) = state.halo() {
        for mut transform in &mut halos {
            *transform = halo.transform();
        }
    }

    let Some(pool) = state.particles() else {
        return;
    };
    let anchor = state.anchor();
    for (droplet, mut transform, material) in &mut droplets {
        let Some(particle) = pool.particles().get(droplet.index) else {
            continue;
        };
        transform.translation = particle.world_position(anchor);
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color = DROPLET_COLOR.with_alpha(particle.opacity());
        }
    }
}

fn spawn_effect_primitives(
    commands: &mut Commands,
    state: &EffectsState,
    effect_meshes: &mut EffectMeshes,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    if let Some(halo) = state.halo() {
        let mesh = effect_meshes
            .halo
            .get_or_insert_with(|| meshes.add(Sphere::new(HALO_RADIUS)))
            .clone();
        commands.spawn((
            RuntimeSceneEntity,
            EffectPrimitive,
            HaloMarker,
            Name::new("Halo"),
            Mesh3d(mesh),
            MeshMaterial3d(materials.add(translucent_material(HALO_COLOR))),
            halo.transform(),
            NotShadowCaster,
        ));
    }

    let Some(pool) = state.particles() else {
        return;
    };
    let mesh = effect_meshes
        .droplet
        .get_or_insert_with(|| meshes.add(Sphere::new(DROPLET_RADIUS)))
        .clone();
    let anchor = state.anchor();
    for (index, particle) in pool.particles().iter().enumerate() {
        let color = DROPLET_COLOR.with_alpha(particle.opacity());
        commands.spawn((
            RuntimeSceneEntity,
            EffectPrimitive,
            BleedDroplet { index },
            Mesh3d(mesh.clone()),
            MeshMaterial3d(materials.add(translucent_material(color))),
            Transform::from_translation(particle.world_position(anchor)),
            NotShadowCaster,
        ));
    }
}

fn translucent_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    }
}
