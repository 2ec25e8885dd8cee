//! World generation parameters and their defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::WorldConfigError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default world extent, in chunks per axis.
pub const DEFAULT_WORLD_CHUNKS: usize = 16;
/// Default chunk side length in world units (one unit = one cell at full detail).
pub const DEFAULT_CHUNK_SIZE: u32 = 64;
/// Default noise seed.
pub const DEFAULT_SEED: u64 = 42;
/// Default base noise frequency; lower values give broader landforms.
pub const DEFAULT_NOISE_SCALE: f32 = 0.008;
/// Default octave count for the fractal noise sum.
pub const DEFAULT_OCTAVES: u32 = 5;
/// Default per-octave amplitude falloff.
pub const DEFAULT_PERSISTENCE: f32 = 0.5;
/// Default per-octave frequency gain.
pub const DEFAULT_LACUNARITY: f32 = 2.0;
/// Default multiplier from normalized noise to world-space height.
pub const DEFAULT_HEIGHT_MULTIPLIER: f32 = 40.0;
/// Default pre-load margin around the visible window, in chunks.
pub const DEFAULT_PRELOAD_MARGIN: usize = 1;
/// Default camera height at or below which chunks stream at full detail.
pub const DEFAULT_FULL_DETAIL_HEIGHT: f32 = 600.0;

// ---------------------------------------------------------------------------
// Configuration resource
// ---------------------------------------------------------------------------

/// How chunk heightmaps are triangulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MeshShading {
    /// Six unique vertices per cell; every triangle keeps its own face
    /// normal for a faceted look.
    #[default]
    Flat,
    /// One shared vertex per grid point; normals average across faces.
    Smooth,
}

/// Generation parameters, fixed at world creation and immutable afterwards.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// World width in chunks.
    pub width: usize,
    /// World height in chunks.
    pub height: usize,
    /// Chunk side length in world units.
    pub chunk_size: u32,
    /// Seed driving every random decision in generation.
    pub seed: u64,
    /// Base noise frequency.
    pub scale: f32,
    /// Number of noise octaves to sum.
    pub octaves: u32,
    /// Amplitude falloff per octave, usually in (0, 1).
    pub persistence: f32,
    /// Frequency gain per octave, usually above 1.
    pub lacunarity: f32,
    /// World-space X offset applied to every noise sample; scrolls the
    /// landscape without changing the seed.
    pub offset_x: f32,
    /// World-space Z offset applied to every noise sample.
    pub offset_z: f32,
    /// Multiplier from normalized noise to world-space height.
    pub height_multiplier: f32,
    /// Extra chunks streamed around the visible window so terrain does not
    /// pop in at the viewport edge.
    pub preload_margin: usize,
    /// Camera height at or below which the target detail is 1.0.
    pub full_detail_height: f32,
    /// Triangulation mode for streamed chunks.
    pub shading: MeshShading,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WORLD_CHUNKS,
            height: DEFAULT_WORLD_CHUNKS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            seed: DEFAULT_SEED,
            scale: DEFAULT_NOISE_SCALE,
            octaves: DEFAULT_OCTAVES,
            persistence: DEFAULT_PERSISTENCE,
            lacunarity: DEFAULT_LACUNARITY,
            offset_x: 0.0,
            offset_z: 0.0,
            height_multiplier: DEFAULT_HEIGHT_MULTIPLIER,
            preload_margin: DEFAULT_PRELOAD_MARGIN,
            full_detail_height: DEFAULT_FULL_DETAIL_HEIGHT,
            shading: MeshShading::default(),
        }
    }
}

impl WorldConfig {
    /// Lowest detail that still produces a one-cell heightmap for this chunk
    /// size. Doubles as the coarse baseline detail chunks fall back to when
    /// they leave the visible window.
    pub fn min_detail(&self) -> f32 {
        1.0 / self.chunk_size as f32
    }

    /// Validate the world-level parameters, failing fast on anything that
    /// would silently change generated output if clamped. Noise-specific
    /// parameters are checked again by `NoiseField::new`, which owns that
    /// part of the contract.
    pub fn validate(&self) -> Result<(), WorldConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(WorldConfigError::EmptyWorld);
        }
        if self.chunk_size == 0 {
            return Err(WorldConfigError::ZeroChunkSize);
        }
        if !self.height_multiplier.is_finite() {
            return Err(WorldConfigError::NonFiniteHeightMultiplier);
        }
        if !self.full_detail_height.is_finite() || self.full_detail_height <= 0.0 {
            return Err(WorldConfigError::NonPositiveFullDetailHeight);
        }
        Ok(())
    }
}
