//! Chunk identity and per-chunk streaming state.

use serde::{Deserialize, Serialize};

use crate::heightmap::HeightGrid;
use crate::surface::SurfaceHandle;

/// Grid coordinate of a chunk, in `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: usize,
    pub y: usize,
}

impl ChunkPos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// One streamed chunk of the world.
///
/// Chunks are created once at world generation and live until world teardown;
/// streaming only swaps their geometry. The cached `detail` is what the
/// controller compares against the tick's target to skip redundant
/// regeneration, and `heights` always matches the geometry of the current
/// surface.
#[derive(Debug)]
pub struct Chunk {
    /// Grid coordinate, fixed for the chunk's lifetime.
    pub pos: ChunkPos,
    /// Detail the current geometry was generated at. `0.0` until the first
    /// generation pass runs; every generated detail is strictly positive, so
    /// a fresh chunk never falsely matches a target.
    pub detail: f32,
    /// Height samples backing the current surface geometry.
    pub heights: HeightGrid,
    /// The chunk's one renderable surface, owned through the backend.
    pub surface: Option<SurfaceHandle>,
}

impl Chunk {
    /// A chunk slot with no geometry yet; the world-generation pass fills it
    /// in before anything can observe it.
    pub(crate) fn unloaded(pos: ChunkPos) -> Self {
        Self {
            pos,
            detail: 0.0,
            heights: HeightGrid::empty(),
            surface: None,
        }
    }

    /// Whether the chunk currently owns generated geometry.
    pub fn is_loaded(&self) -> bool {
        self.surface.is_some()
    }
}
