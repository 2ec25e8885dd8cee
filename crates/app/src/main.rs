use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use terrain::config::WorldConfig;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Overworld".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .insert_resource(world_config_from_env())
    .add_plugins(rendering::RenderingPlugin);

    app.run();
}

/// Default world parameters, with the seed overridable via `OVERWORLD_SEED`.
fn world_config_from_env() -> WorldConfig {
    let mut config = WorldConfig::default();
    if let Ok(raw) = std::env::var("OVERWORLD_SEED") {
        match raw.parse::<u64>() {
            Ok(seed) => config.seed = seed,
            Err(_) => warn!("Ignoring unparseable OVERWORLD_SEED {raw:?}"),
        }
    }
    config
}
