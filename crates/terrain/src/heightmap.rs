//! Chunk heightmaps sampled from the noise field.
//!
//! A grid at resolution `R` carries `(R + 1) x (R + 1)` samples: mesh
//! synthesis needs one extra row and column so `N + 1` samples can emit `N`
//! quads, and so adjacent chunks share their border sample coordinates.

use crate::chunk::ChunkPos;
use crate::config::WorldConfig;
use crate::noise_field::NoiseField;

/// Square grid of world-space height samples for one chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    resolution: usize,
    samples: Vec<f32>,
}

impl HeightGrid {
    /// Build a grid by evaluating `f` at every sample index, row by row.
    pub fn from_fn(resolution: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let side = resolution + 1;
        let mut samples = Vec::with_capacity(side * side);
        for ty in 0..side {
            for tx in 0..side {
                samples.push(f(tx, ty));
            }
        }
        Self {
            resolution,
            samples,
        }
    }

    /// Placeholder before the first generation pass; zero quads, one sample.
    pub(crate) fn empty() -> Self {
        Self {
            resolution: 0,
            samples: vec![0.0],
        }
    }

    /// Quads per side.
    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Samples per side, always `resolution + 1`.
    #[inline]
    pub fn side(&self) -> usize {
        self.resolution + 1
    }

    /// Height at sample index `(tx, ty)`, both in `[0, resolution]`.
    #[inline]
    pub fn get(&self, tx: usize, ty: usize) -> f32 {
        self.samples[ty * self.side() + tx]
    }

    /// All samples, row-major.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

/// Maps a chunk position and detail level to a height grid.
pub struct HeightmapBuilder {
    noise: NoiseField,
    chunk_size: u32,
    height_multiplier: f32,
}

impl HeightmapBuilder {
    pub fn new(noise: NoiseField, config: &WorldConfig) -> Self {
        Self {
            noise,
            chunk_size: config.chunk_size,
            height_multiplier: config.height_multiplier,
        }
    }

    /// Quads per chunk side at the given detail, never less than one.
    ///
    /// The floor matches the tile count a full-detail chunk would have been
    /// divided into; the clamp keeps a too-low detail from producing an empty
    /// grid (that policy lives here and in the streaming clamp, not in mesh
    /// synthesis).
    pub fn resolution_for_detail(&self, detail: f32) -> usize {
        ((self.chunk_size as f32 * detail).floor() as usize).max(1)
    }

    /// Sample a chunk's height grid at the given detail.
    ///
    /// Sample index `tx` maps to the continuous chunk-local offset
    /// `tx / resolution * chunk_size`, so a coarse grid spreads its few
    /// samples across the full chunk extent instead of bunching them in a
    /// corner. Border samples land exactly on chunk boundaries, which is what
    /// lets neighboring chunks at equal detail agree on shared edge heights.
    pub fn build(&self, pos: ChunkPos, detail: f32) -> HeightGrid {
        let resolution = self.resolution_for_detail(detail);
        let chunk_size = self.chunk_size as f32;
        let origin_x = pos.x as f32 * chunk_size;
        let origin_z = pos.y as f32 * chunk_size;

        HeightGrid::from_fn(resolution, |tx, ty| {
            let local_x = tx as f32 / resolution as f32 * chunk_size;
            let local_z = ty as f32 / resolution as f32 * chunk_size;
            self.noise.sample(origin_x + local_x, origin_z + local_z) * self.height_multiplier
        })
    }

    /// The noise field heights are sampled from.
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }
}
