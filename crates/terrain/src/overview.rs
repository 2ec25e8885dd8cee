//! Debug overview texture: the whole world's noise classified into a small
//! RGBA map (water below the threshold, land above), engine-agnostic. The
//! rendering crate wraps the buffer in a GPU image on demand.

use crate::config::WorldConfig;
use crate::noise_field::NoiseField;

/// Normalized height below which a sample reads as water.
pub const WATER_THRESHOLD: f32 = 0.5;

/// Fixed pixel width of the overview; height follows the world's aspect.
pub const OVERVIEW_WIDTH: u32 = 512;

/// Raw RGBA8 overview pixels, row-major from the world's (0, 0) corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Render the overview map for the world the config describes.
///
/// Samples raw noise at pixel centers, so the map matches the terrain at any
/// chunk detail level.
pub fn render_overview(config: &WorldConfig, noise: &NoiseField) -> OverviewImage {
    render_scaled(config, noise, OVERVIEW_WIDTH)
}

fn render_scaled(config: &WorldConfig, noise: &NoiseField, width: u32) -> OverviewImage {
    let world_w = config.width as f32 * config.chunk_size as f32;
    let world_h = config.height as f32 * config.chunk_size as f32;
    let height = ((width as f32 * world_h / world_w).round() as u32).max(1);

    let scale_x = world_w / width as f32;
    let scale_y = world_h / height as f32;

    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for py in 0..height {
        for px in 0..width {
            let wx = (px as f32 + 0.5) * scale_x;
            let wz = (py as f32 + 0.5) * scale_y;
            pixels.extend_from_slice(&classify(noise.sample(wx, wz)));
        }
    }

    OverviewImage {
        width,
        height,
        pixels,
    }
}

/// Map a normalized height to its overview color.
fn classify(height: f32) -> [u8; 4] {
    if height < WATER_THRESHOLD {
        // Deeper water shifts further into blue.
        let depth = (1.0 - height / WATER_THRESHOLD).clamp(0.0, 1.0);
        to_rgba8(
            0.10 + depth * 0.04,
            0.20 + depth * 0.08,
            0.35 + depth * 0.20,
        )
    } else {
        // Land lightens with elevation.
        let lift = ((height - WATER_THRESHOLD) / (1.0 - WATER_THRESHOLD)).clamp(0.0, 1.0);
        to_rgba8(
            0.20 + lift * 0.28,
            0.42 + lift * 0.22,
            0.18 + lift * 0.20,
        )
    }
}

/// Convert floating-point RGB (0.0-1.0) to `[u8; 4]` RGBA with full alpha.
fn to_rgba8(r: f32, g: f32, b: f32) -> [u8; 4] {
    [
        (r * 255.0).clamp(0.0, 255.0) as u8,
        (g * 255.0).clamp(0.0, 255.0) as u8,
        (b * 255.0).clamp(0.0, 255.0) as u8,
        255,
    ]
}
