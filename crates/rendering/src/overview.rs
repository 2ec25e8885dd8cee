//! Overview map overlay: the world's noise classified into a texture on a
//! quad hovering above the terrain, toggled with M. The texture is rendered
//! once, the first time the map is shown.

use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use terrain::overview::{render_overview, OverviewImage};
use terrain::world::TerrainWorld;

/// Quad height above the terrain's tallest possible point.
const OVERVIEW_CLEARANCE: f32 = 20.0;

#[derive(Resource, Default)]
pub struct OverviewState {
    pub shown: bool,
}

/// Marker for the overview quad entity.
#[derive(Component)]
pub struct OverviewQuad;

/// M toggles the overview map.
pub fn toggle_overview(keys: Res<ButtonInput<KeyCode>>, mut state: ResMut<OverviewState>) {
    if keys.just_pressed(KeyCode::KeyM) {
        state.shown = !state.shown;
    }
}

/// Render the overview texture and spawn its quad the first time the map is
/// shown; later toggles only flip visibility.
pub fn spawn_overview_quad(
    mut commands: Commands,
    state: Res<OverviewState>,
    world: Option<Res<TerrainWorld>>,
    existing: Query<Entity, With<OverviewQuad>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    if !state.shown || !existing.is_empty() {
        return;
    }
    let Some(world) = world else {
        return;
    };

    let overview = render_overview(world.config(), world.noise());
    info!("Rendered {}x{} overview map", overview.width, overview.height);
    let image_handle = images.add(overview_to_image(overview));

    let config = world.config();
    let world_w = config.width as f32 * config.chunk_size as f32;
    let world_h = config.height as f32 * config.chunk_size as f32;

    // Flat quad covering the entire world on the XZ plane
    let mesh = meshes.add(
        Mesh::new(
            bevy::render::mesh::PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
        )
        .with_inserted_attribute(
            Mesh::ATTRIBUTE_POSITION,
            vec![
                [0.0, 0.0, 0.0],
                [world_w, 0.0, 0.0],
                [world_w, 0.0, world_h],
                [0.0, 0.0, world_h],
            ],
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, vec![[0.0, 1.0, 0.0]; 4])
        .with_inserted_attribute(
            Mesh::ATTRIBUTE_UV_0,
            vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        )
        .with_inserted_indices(bevy::render::mesh::Indices::U32(vec![0, 2, 1, 0, 3, 2])),
    );

    let material = materials.add(StandardMaterial {
        base_color_texture: Some(image_handle),
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_xyz(0.0, config.height_multiplier + OVERVIEW_CLEARANCE, 0.0),
        Visibility::Hidden,
        OverviewQuad,
    ));
}

/// Sync quad visibility with the toggle.
pub fn apply_overview_visibility(
    state: Res<OverviewState>,
    mut quad_q: Query<&mut Visibility, With<OverviewQuad>>,
) {
    let target = if state.shown {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for mut visibility in &mut quad_q {
        if *visibility != target {
            *visibility = target;
        }
    }
}

fn overview_to_image(overview: OverviewImage) -> Image {
    let mut image = Image::new(
        Extent3d {
            width: overview.width,
            height: overview.height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        overview.pixels,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    );
    image.sampler = bevy::image::ImageSampler::linear();
    image
}
