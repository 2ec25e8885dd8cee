//! Startup world generation and the per-frame streaming driver.

use bevy::prelude::*;

use terrain::streaming::CameraView;
use terrain::world::TerrainWorld;

use crate::surface_backend::{BevyBackend, SurfaceRegistry};

/// Shared material for every terrain surface.
#[derive(Resource)]
pub struct TerrainMaterial(pub Handle<StandardMaterial>);

/// Generate the full world at baseline detail so every chunk has a surface
/// before the first frame renders.
pub fn setup_world(
    mut commands: Commands,
    config: Res<terrain::config::WorldConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut registry: ResMut<SurfaceRegistry>,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.44, 0.53, 0.38),
        perceptual_roughness: 0.9,
        ..default()
    });
    commands.insert_resource(TerrainMaterial(material.clone()));

    let generated = {
        let mut backend = BevyBackend::new(&mut commands, &mut meshes, &mut registry, material);
        TerrainWorld::generate((*config).clone(), &mut backend)
    };
    match generated {
        Ok(world) => commands.insert_resource(world),
        // Without a world there is nothing to stream; the window stays empty
        // and the config error names the offending field.
        Err(err) => error!("World generation failed: {err}"),
    }
}

/// Advance chunk streaming against the latest published camera view.
pub fn stream_chunks(
    mut commands: Commands,
    view: Res<CameraView>,
    world: Option<ResMut<TerrainWorld>>,
    material: Option<Res<TerrainMaterial>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut registry: ResMut<SurfaceRegistry>,
) {
    let (Some(mut world), Some(material)) = (world, material) else {
        return;
    };

    let mut backend =
        BevyBackend::new(&mut commands, &mut meshes, &mut registry, material.0.clone());
    world.tick(&view, &mut backend);
}
