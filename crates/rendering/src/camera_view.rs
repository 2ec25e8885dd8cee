//! Publishes the [`CameraView`] the streaming controller consumes.

use bevy::prelude::*;

use terrain::streaming::CameraView;

/// Estimate the visible ground (Y=0) rectangle by casting rays from the four
/// viewport corners, and publish it together with the camera's height.
///
/// Corners whose rays miss the ground plane (looking at the horizon or up)
/// contribute nothing; if no corner hits, the previous view is kept so the
/// streamer never reacts to a degenerate frame.
pub fn publish_camera_view(
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut view: ResMut<CameraView>,
) {
    let Ok((camera, cam_transform)) = camera_q.get_single() else {
        return;
    };

    let viewport_size = camera
        .logical_viewport_size()
        .unwrap_or(Vec2::new(1280.0, 720.0));
    let corners = [
        Vec2::ZERO,
        Vec2::new(viewport_size.x, 0.0),
        Vec2::new(0.0, viewport_size.y),
        viewport_size,
    ];

    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;
    let mut min_z = f32::MAX;
    let mut max_z = f32::MIN;

    for corner in &corners {
        if let Ok(ray) = camera.viewport_to_world(cam_transform, *corner) {
            if ray.direction.y.abs() > 1e-6 {
                let t = -ray.origin.y / ray.direction.y;
                if t > 0.0 {
                    let hit = ray.origin + ray.direction * t;
                    min_x = min_x.min(hit.x);
                    max_x = max_x.max(hit.x);
                    min_z = min_z.min(hit.z);
                    max_z = max_z.max(hit.z);
                }
            }
        }
    }

    if min_x < f32::MAX {
        let next = CameraView {
            eye_height: cam_transform.translation().y.max(1.0),
            ground_min: Vec2::new(min_x, min_z),
            ground_max: Vec2::new(max_x, max_z),
        };
        // Only write on change so downstream change detection stays quiet
        // while the camera is idle.
        if *view != next {
            *view = next;
        }
    }
}
