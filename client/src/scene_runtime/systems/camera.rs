use crate::scene_runtime::components::{OrbitCamera, RuntimeSceneEntity};
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::input::EguiWantsInput;

const CAMERA_START: Vec3 = Vec3::new(0.0, 2.0, 4.0);
const CAMERA_MIN_DISTANCE: f32 = 1.0;
const CAMERA_MAX_DISTANCE: f32 = 12.0;
const CAMERA_ZOOM_SPEED: f32 = 0.4;
const CAMERA_PITCH_LIMIT: f32 = 1.2;

impl OrbitCamera {
    /// Orbit around `target` that places the eye at `position`.
    pub fn from_position(target: Vec3, position: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length().clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
        let pitch = (offset.y / offset.length().max(f32::EPSILON))
            .clamp(-1.0, 1.0)
            .asin();

        Self {
            target,
            yaw: offset.z.atan2(offset.x),
            pitch,
            distance,
            min_distance: CAMERA_MIN_DISTANCE,
            max_distance: CAMERA_MAX_DISTANCE,
            yaw_speed: 1.8,
            pitch_speed: 1.4,
            zoom_speed: CAMERA_ZOOM_SPEED,
        }
    }
}

pub fn spawn_orbit_camera(mut commands: Commands) {
    let orbit_camera = OrbitCamera::from_position(Vec3::ZERO, CAMERA_START);
    let mut transform = Transform::default();
    apply_orbit_transform(&mut transform, &orbit_camera);

    commands.spawn((
        RuntimeSceneEntity,
        Name::new("ViewerCamera"),
        Camera3d::default(),
        transform,
        orbit_camera,
    ));
}

/// A/D yaw, W/S pitch, wheel zoom. No panning.
pub fn update_orbit_camera(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    egui_wants_input: Option<Res<EguiWantsInput>>,
    mut mouse_wheel_events: MessageReader<MouseWheel>,
    mut cameras: Query<(&mut Transform, &mut OrbitCamera)>,
) {
    let wants_keyboard_input = egui_wants_input
        .as_ref()
        .is_some_and(|wants| wants.wants_any_keyboard_input());
    let wants_pointer_input = egui_wants_input
        .as_ref()
        .is_some_and(|wants| wants.wants_any_pointer_input());

    let mut yaw_input = 0.0f32;
    let mut pitch_input = 0.0f32;
    if !wants_keyboard_input {
        if keys.pressed(KeyCode::KeyA) {
            yaw_input -= 1.0;
        }
        if keys.pressed(KeyCode::KeyD) {
            yaw_input += 1.0;
        }
        if keys.pressed(KeyCode::KeyW) {
            pitch_input += 1.0;
        }
        if keys.pressed(KeyCode::KeyS) {
            pitch_input -= 1.0;
        }
    }

    let mut zoom_input = 0.0f32;
    for event in mouse_wheel_events.read() {
        if wants_pointer_input {
            continue;
        }
        let unit_scale = match event.unit {
            MouseScrollUnit::Line => 1.0,
            MouseScrollUnit::Pixel => 0.02,
        };
        zoom_input += event.y * unit_scale;
    }

    if yaw_input == 0.0 && pitch_input == 0.0 && zoom_input == 0.0 {
        return;
    }

    let dt = time.delta_secs();
    for (mut transform, mut orbit) in &mut cameras {
        orbit.distance = (orbit.distance - zoom_input * orbit.zoom_speed)
            .clamp(orbit.min_distance, orbit.max_distance);
        orbit.yaw += yaw_input * orbit.yaw_speed * dt;
        orbit.pitch = (orbit.pitch + pitch_input * orbit.pitch_speed * dt)
            .clamp(-CAMERA_PITCH_LIMIT, CAMERA_PITCH_LIMIT);
        apply_orbit_transform(&mut transform, &orbit);
    }
}

pub fn apply_orbit_transform(transform: &mut Transform, orbit: &OrbitCamera) {
    let cos_pitch = orbit.pitch.cos();
    let direction = Vec3::new(
        orbit.yaw.cos() * cos_pitch,
        orbit.pitch.sin(),
        orbit.yaw.sin() * cos_pitch,
    );
    transform.translation = orbit.target + direction * orbit.distance;
    transform.look_at(orbit.target, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_from_position_reproduces_start_pose() {
        let orbit = OrbitCamera::from_position(Vec3::ZERO, CAMERA_START);
        let mut transform = Transform::default();
        apply_orbit_transform(&mut transform, &orbit);

        assert!(transform.translation.distance(CAMERA_START) < 1e-4);
        let forward = transform.forward();
        assert!(forward.dot(-CAMERA_START.normalize()) > 0.9999);
    }

    #[test]
    fn orbit_distance_respects_limits() {
        let near = OrbitCamera::from_position(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.1));
        assert_eq!(near.distance, CAMERA_MIN_DISTANCE);
        let far = OrbitCamera::from_position(Vec3::ZERO, Vec3::new(0.0, 0.0, 100.0));
        assert_eq!(far.distance, CAMERA_MAX_DISTANCE);
    }
}
