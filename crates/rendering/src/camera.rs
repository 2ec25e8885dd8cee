use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use terrain::config::WorldConfig;

const PAN_SPEED: f32 = 400.0;
const ROTATE_SPEED: f32 = 1.5;
const ZOOM_SPEED: f32 = 0.15;
const MIN_DISTANCE: f32 = 20.0;
const MAX_DISTANCE: f32 = 4000.0;

/// Overhead camera model: the camera hangs above a focus point on the ground
/// at a fixed pitch, orbiting it in yaw.
#[derive(Resource)]
pub struct OverheadCamera {
    /// Ground point the camera looks at
    pub focus: Vec3,
    /// Horizontal rotation in radians
    pub yaw: f32,
    /// Elevation angle in radians
    pub pitch: f32,
    /// Distance from focus point
    pub distance: f32,
}

impl OverheadCamera {
    /// Start centered over the world, far enough out to see most of it.
    pub fn for_world(config: &WorldConfig) -> Self {
        let world_w = config.width as f32 * config.chunk_size as f32;
        let world_h = config.height as f32 * config.chunk_size as f32;
        Self {
            focus: Vec3::new(world_w / 2.0, 0.0, world_h / 2.0),
            yaw: 0.0,
            pitch: 60.0_f32.to_radians(),
            distance: (world_w.max(world_h) * 0.9).clamp(MIN_DISTANCE, MAX_DISTANCE),
        }
    }
}

pub fn setup_camera(mut commands: Commands, config: Res<WorldConfig>) {
    let overhead = OverheadCamera::for_world(&config);
    let (pos, look_at) = overhead_to_transform(&overhead);

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(pos).looking_at(look_at, Vec3::Y),
    ));
    commands.insert_resource(overhead);
}

fn clamp_focus(focus: &mut Vec3, config: &WorldConfig) {
    let margin = config.chunk_size as f32 * 2.0;
    let world_w = config.width as f32 * config.chunk_size as f32;
    let world_h = config.height as f32 * config.chunk_size as f32;
    focus.x = focus.x.clamp(-margin, world_w + margin);
    focus.z = focus.z.clamp(-margin, world_h + margin);
}

fn overhead_to_transform(overhead: &OverheadCamera) -> (Vec3, Vec3) {
    // Spherical to cartesian offset from focus
    let x = overhead.distance * overhead.pitch.cos() * overhead.yaw.sin();
    let y = overhead.distance * overhead.pitch.sin();
    let z = overhead.distance * overhead.pitch.cos() * overhead.yaw.cos();
    let pos = overhead.focus + Vec3::new(x, y, z);
    (pos, overhead.focus)
}

/// System: apply OverheadCamera state to the actual camera Transform each frame.
pub fn apply_overhead_camera(
    overhead: Res<OverheadCamera>,
    mut query: Query<&mut Transform, With<Camera3d>>,
) {
    if !overhead.is_changed() {
        return;
    }
    let (pos, look_at) = overhead_to_transform(&overhead);
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = Transform::from_translation(pos).looking_at(look_at, Vec3::Y);
}

/// WASD/Arrow keys: pan focus along ground plane (direction relative to current yaw).
pub fn camera_pan_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<WorldConfig>,
    mut overhead: ResMut<OverheadCamera>,
) {
    let scale = overhead.distance / 1000.0;

    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }

    if dir != Vec2::ZERO {
        let dir = dir.normalize();
        let delta = PAN_SPEED * scale * time.delta_secs();
        // Rotate movement direction by current yaw
        let cos_yaw = overhead.yaw.cos();
        let sin_yaw = overhead.yaw.sin();
        let world_x = dir.x * cos_yaw + dir.y * sin_yaw;
        let world_z = -dir.x * sin_yaw + dir.y * cos_yaw;
        overhead.focus.x += world_x * delta;
        overhead.focus.z += world_z * delta;
        clamp_focus(&mut overhead.focus, &config);
    }
}

/// Q/E keys: rotate the view around the focus point.
pub fn camera_rotate_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut overhead: ResMut<OverheadCamera>,
) {
    let mut turn = 0.0;
    if keys.pressed(KeyCode::KeyQ) {
        turn += 1.0;
    }
    if keys.pressed(KeyCode::KeyE) {
        turn -= 1.0;
    }
    if turn != 0.0 {
        overhead.yaw += turn * ROTATE_SPEED * time.delta_secs();
    }
}

/// Scroll wheel: zoom (change distance).
pub fn camera_zoom(mut scroll_evts: EventReader<MouseWheel>, mut overhead: ResMut<OverheadCamera>) {
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        let factor = 1.0 - dy * ZOOM_SPEED;
        overhead.distance = (overhead.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}
