use bevy::prelude::*;

pub mod camera;
pub mod camera_view;
pub mod overview;
pub mod streaming;
pub mod surface_backend;

use overview::OverviewState;
use surface_backend::SurfaceRegistry;
use terrain::config::WorldConfig;
use terrain::streaming::CameraView;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldConfig>()
            .init_resource::<CameraView>()
            .init_resource::<SurfaceRegistry>()
            .init_resource::<OverviewState>()
            .add_systems(
                Startup,
                (streaming::setup_world, camera::setup_camera, setup_lighting).chain(),
            )
            .add_systems(
                Update,
                (
                    camera::camera_pan_keyboard,
                    camera::camera_rotate_keyboard,
                    camera::camera_zoom,
                    camera::apply_overhead_camera,
                ),
            )
            .add_systems(
                Update,
                (camera_view::publish_camera_view, streaming::stream_chunks).chain(),
            )
            .add_systems(
                Update,
                (
                    overview::toggle_overview,
                    overview::spawn_overview_quad,
                    overview::apply_overview_visibility,
                )
                    .chain(),
            );
    }
}

fn setup_lighting(mut commands: Commands) {
    // Ambient light for baseline illumination
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 300.0,
    });

    // Directional light (sun) angled from above
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_4, // 45 degrees down
            std::f32::consts::FRAC_PI_6,  // slight rotation
            0.0,
        )),
    ));
}
