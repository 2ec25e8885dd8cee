//! Deterministic multi-octave noise sampling with global normalization.
//!
//! The field is a pure function of the seed: identical world coordinates
//! always return the identical height fraction, no matter which chunk asked.
//! Normalization divides by the maximum achievable octave amplitude instead
//! of a per-call min/max, so chunks sampled independently agree at shared
//! border points and the terrain shows no seams.

use bevy::prelude::*;
use fastnoise_lite::{FastNoiseLite, NoiseType};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::WorldConfig;
use crate::error::WorldConfigError;

/// Range the per-octave sample offsets are drawn from.
const OCTAVE_OFFSET_RANGE: f32 = 100_000.0;

/// Seeded fractal noise sampler returning values in [0, 1].
pub struct NoiseField {
    noise: FastNoiseLite,
    octave_offsets: Vec<Vec2>,
    scale: f32,
    persistence: f32,
    lacunarity: f32,
    max_amplitude: f32,
}

impl NoiseField {
    /// Build the sampler from the noise-related configuration.
    ///
    /// Fails fast on parameters that would degenerate the field: a
    /// non-positive scale collapses all samples onto one input point, and
    /// zero octaves leave nothing to sum.
    pub fn new(config: &WorldConfig) -> Result<Self, WorldConfigError> {
        if !config.scale.is_finite() || config.scale <= 0.0 {
            return Err(WorldConfigError::NonPositiveNoiseScale);
        }
        if config.octaves == 0 {
            return Err(WorldConfigError::ZeroOctaves);
        }
        if !config.persistence.is_finite() || config.persistence <= 0.0 {
            return Err(WorldConfigError::NonPositivePersistence);
        }
        if !config.lacunarity.is_finite() || config.lacunarity <= 0.0 {
            return Err(WorldConfigError::NonPositiveLacunarity);
        }

        let mut noise = FastNoiseLite::with_seed(config.seed as i32);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        // All frequency control happens in `sample`; the library multiplies
        // inputs by its own frequency, so pin it to 1.
        noise.set_frequency(Some(1.0));

        // Each octave samples a decorrelated region of the base noise. The
        // offsets come from the seed so they replay exactly, and the world
        // offset is folded in once here instead of per sample.
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let octave_offsets: Vec<Vec2> = (0..config.octaves)
            .map(|_| {
                let dx = rng.gen_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE);
                let dz = rng.gen_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE);
                Vec2::new(dx + config.offset_x, dz + config.offset_z)
            })
            .collect();

        let mut max_amplitude = 0.0;
        let mut amplitude = 1.0;
        for _ in 0..config.octaves {
            max_amplitude += amplitude;
            amplitude *= config.persistence;
        }

        Ok(Self {
            noise,
            octave_offsets,
            scale: config.scale,
            persistence: config.persistence,
            lacunarity: config.lacunarity,
            max_amplitude,
        })
    }

    /// Sample the field at a world-space point.
    ///
    /// Octave `i` runs at frequency `scale * lacunarity^i` with weight
    /// `persistence^i`; the weighted sum is divided by the maximum
    /// achievable amplitude and remapped from [-1, 1] to [0, 1].
    pub fn sample(&self, world_x: f32, world_z: f32) -> f32 {
        let mut frequency = self.scale;
        let mut amplitude = 1.0;
        let mut total = 0.0;

        for offset in &self.octave_offsets {
            let sx = (world_x + offset.x) * frequency;
            let sz = (world_z + offset.y) * frequency;
            total += self.noise.get_noise_2d(sx, sz) * amplitude;
            frequency *= self.lacunarity;
            amplitude *= self.persistence;
        }

        ((total / self.max_amplitude + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}
