//! Visibility and detail policy for the chunk streamer.
//!
//! Pure functions from camera state to "which chunks, at what detail"; the
//! stateful per-tick loop that acts on these lives in [`crate::world`].

use bevy::prelude::*;

use crate::chunk::ChunkPos;
use crate::config::WorldConfig;

/// Read-only camera state consumed by the streamer each tick.
///
/// `ground_min`/`ground_max` are the axis-aligned bounds (world-space XZ) of
/// the viewport corners projected onto the ground plane, so `ground_min` is
/// componentwise less than or equal to `ground_max`. Producing this is the
/// camera collaborator's job; the core never reads the camera itself.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    /// Camera height above the ground plane; the zoom axis.
    pub eye_height: f32,
    /// Bottom-left of the projected ground rectangle.
    pub ground_min: Vec2,
    /// Top-right of the projected ground rectangle.
    pub ground_max: Vec2,
}

impl Default for CameraView {
    /// A view from nowhere: infinitely high with a zero ground footprint.
    /// Ticking against it keeps every chunk at the coarse baseline, so a
    /// world is safe to drive before the first real view is published.
    fn default() -> Self {
        Self {
            eye_height: f32::INFINITY,
            ground_min: Vec2::ZERO,
            ground_max: Vec2::ZERO,
        }
    }
}

/// Inclusive rectangular range of chunk coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkWindow {
    pub min: ChunkPos,
    pub max: ChunkPos,
}

impl ChunkWindow {
    pub fn contains(&self, pos: ChunkPos) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.y >= self.min.y && pos.y <= self.max.y
    }

    /// Chunks per axis covered by the window.
    pub fn size(&self) -> (usize, usize) {
        (self.max.x - self.min.x + 1, self.max.y - self.min.y + 1)
    }

    pub fn chunk_count(&self) -> usize {
        let (w, h) = self.size();
        w * h
    }

    /// All contained positions, row by row.
    pub fn positions(self) -> impl Iterator<Item = ChunkPos> {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| ChunkPos::new(x, y)))
    }
}

/// Work done by one streaming tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Chunks regenerated at the tick's target detail.
    pub refined: usize,
    /// Chunks that left the window and fell back to the baseline detail.
    pub downgraded: usize,
}

impl TickReport {
    pub fn regenerated(&self) -> usize {
        self.refined + self.downgraded
    }

    pub fn is_idle(&self) -> bool {
        self.regenerated() == 0
    }
}

/// Target detail for a camera at the given height.
///
/// `full_detail_height / eye_height` is snapped down to the nearest
/// reciprocal power of two (1, 1/2, 1/4, ...) and clamped to
/// `[min_detail, 1]`. Monotonic: a lower camera never gets a coarser detail
/// than a higher one. The snap turns a gliding zoom into stable plateaus so
/// the world is not regenerated every frame, and the clamp floor guarantees
/// every chunk keeps at least a one-quad heightmap.
pub fn detail_for_height(config: &WorldConfig, eye_height: f32) -> f32 {
    let floor = config.min_detail();
    let raw = config.full_detail_height / eye_height.max(f32::MIN_POSITIVE);
    let mut detail = 1.0_f32;
    while detail > raw && detail > floor {
        detail *= 0.5;
    }
    detail.max(floor)
}

/// Chunk window covering the view's ground rectangle plus the pre-load
/// margin, clamped to world bounds.
///
/// The projected rectangle is clamped into the world before conversion, so a
/// camera aimed entirely outside the world resolves to a border window and
/// chunk indexing can never go out of range.
pub fn visible_window(config: &WorldConfig, view: &CameraView) -> ChunkWindow {
    debug_assert!(
        view.ground_min.x <= view.ground_max.x && view.ground_min.y <= view.ground_max.y,
        "ground rectangle must be min/max ordered: {view:?}"
    );

    let chunk_size = config.chunk_size as f32;
    let world_w = config.width as f32 * chunk_size;
    let world_h = config.height as f32 * chunk_size;

    let to_chunk = |world: f32, world_extent: f32, chunks: usize| -> usize {
        let clamped = world.clamp(0.0, world_extent);
        ((clamped / chunk_size).floor() as usize).min(chunks - 1)
    };

    let margin = config.preload_margin;
    let min = ChunkPos::new(
        to_chunk(view.ground_min.x, world_w, config.width).saturating_sub(margin),
        to_chunk(view.ground_min.y, world_h, config.height).saturating_sub(margin),
    );
    let max = ChunkPos::new(
        (to_chunk(view.ground_max.x, world_w, config.width) + margin).min(config.width - 1),
        (to_chunk(view.ground_max.y, world_h, config.height) + margin).min(config.height - 1),
    );

    ChunkWindow { min, max }
}
