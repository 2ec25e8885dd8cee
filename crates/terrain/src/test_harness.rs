//! # TestWorld — headless harness for streaming tests
//!
//! Pairs a [`TerrainWorld`] with a [`RecordingBackend`] so tests can drive
//! ticks from synthetic camera views and assert on the exact surface
//! lifecycle traffic, without an engine or a window.

use bevy::prelude::*;

use crate::chunk::ChunkPos;
use crate::config::WorldConfig;
use crate::mesh::MeshData;
use crate::streaming::{CameraView, TickReport};
use crate::surface::{SurfaceBackend, SurfaceHandle};
use crate::world::TerrainWorld;

// ---------------------------------------------------------------------------
// Recording backend
// ---------------------------------------------------------------------------

/// One call observed by the [`RecordingBackend`], in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Created {
        handle: SurfaceHandle,
        pos: ChunkPos,
        vertex_count: usize,
    },
    Destroyed {
        handle: SurfaceHandle,
    },
    Transformed {
        handle: SurfaceHandle,
        translation: Vec3,
        scale: Vec3,
    },
}

/// Surface backend that records every call instead of touching an engine.
///
/// Handles are minted sequentially, so tests can also assert on creation
/// order. `events` accumulates across ticks until [`clear_events`] is called;
/// the live-handle set always reflects every call since construction.
///
/// [`clear_events`]: RecordingBackend::clear_events
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_handle: u64,
    pub events: Vec<SurfaceEvent>,
    live: Vec<SurfaceHandle>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget recorded events, keeping the live-handle set. Useful to scope
    /// assertions to a single tick.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Surfaces created and not yet destroyed.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn created_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::Created { .. }))
            .count()
    }

    pub fn destroyed_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::Destroyed { .. }))
            .count()
    }

    /// Chunk positions of all recorded creations, in call order.
    pub fn created_positions(&self) -> Vec<ChunkPos> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Created { pos, .. } => Some(*pos),
                _ => None,
            })
            .collect()
    }

    /// The last transform set for the given handle, if any.
    pub fn transform_of(&self, handle: SurfaceHandle) -> Option<(Vec3, Vec3)> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Transformed {
                handle: h,
                translation,
                scale,
            } if *h == handle => Some((*translation, *scale)),
            _ => None,
        })
    }
}

impl SurfaceBackend for RecordingBackend {
    fn create_surface(&mut self, pos: ChunkPos, mesh: &MeshData) -> SurfaceHandle {
        let handle = SurfaceHandle::from_raw(self.next_handle);
        self.next_handle += 1;
        self.live.push(handle);
        self.events.push(SurfaceEvent::Created {
            handle,
            pos,
            vertex_count: mesh.vertex_count(),
        });
        handle
    }

    fn destroy_surface(&mut self, handle: SurfaceHandle) {
        let index = self
            .live
            .iter()
            .position(|&h| h == handle)
            .unwrap_or_else(|| panic!("destroyed unknown or dead surface {handle:?}"));
        self.live.remove(index);
        self.events.push(SurfaceEvent::Destroyed { handle });
    }

    fn set_transform(&mut self, handle: SurfaceHandle, translation: Vec3, scale: Vec3) {
        assert!(
            self.live.contains(&handle),
            "transform set on unknown or dead surface {handle:?}"
        );
        self.events.push(SurfaceEvent::Transformed {
            handle,
            translation,
            scale,
        });
    }
}

// ---------------------------------------------------------------------------
// Canned configurations
// ---------------------------------------------------------------------------

/// 4x4 chunks of 16 units: small enough that tests can reason about every
/// chunk individually.
pub fn small_world_config() -> WorldConfig {
    WorldConfig {
        width: 4,
        height: 4,
        chunk_size: 16,
        preload_margin: 1,
        full_detail_height: 100.0,
        ..Default::default()
    }
}

/// Synthetic overhead view centered on a ground point.
///
/// The ground footprint grows linearly with eye height, which is all the
/// streaming controller observes of a real perspective projection.
pub fn overhead_view(center: Vec2, eye_height: f32) -> CameraView {
    let half = eye_height * 0.5;
    CameraView {
        eye_height,
        ground_min: center - Vec2::splat(half),
        ground_max: center + Vec2::splat(half),
    }
}

// ---------------------------------------------------------------------------
// TestWorld harness
// ---------------------------------------------------------------------------

/// A generated world plus a recording backend, driven tick by tick.
pub struct TestWorld {
    pub world: TerrainWorld,
    pub backend: RecordingBackend,
}

impl TestWorld {
    /// Generate a world for the given config; panics on an invalid config
    /// since harness configs are authored by the test.
    pub fn new(config: WorldConfig) -> Self {
        let mut backend = RecordingBackend::new();
        let world = TerrainWorld::generate(config, &mut backend)
            .expect("harness config should be valid");
        Self { world, backend }
    }

    /// The canned 4x4 world.
    pub fn small() -> Self {
        Self::new(small_world_config())
    }

    /// Center of the world's ground footprint.
    pub fn world_center(&self) -> Vec2 {
        let config = self.world.config();
        Vec2::new(
            config.width as f32 * config.chunk_size as f32 * 0.5,
            config.height as f32 * config.chunk_size as f32 * 0.5,
        )
    }

    /// Tick with a synthetic overhead camera at `center` / `eye_height`.
    pub fn tick_overhead(&mut self, center: Vec2, eye_height: f32) -> TickReport {
        let view = overhead_view(center, eye_height);
        self.world.tick(&view, &mut self.backend)
    }

    /// Tick with an explicit view.
    pub fn tick_view(&mut self, view: &CameraView) -> TickReport {
        self.world.tick(view, &mut self.backend)
    }

    /// Detail currently cached for the chunk at `(x, y)`.
    pub fn detail_at(&self, x: usize, y: usize) -> f32 {
        self.world.chunk(ChunkPos::new(x, y)).detail
    }

    /// Assert every chunk currently sits at the given detail.
    pub fn assert_all_at_detail(&self, expected: f32) {
        for chunk in self.world.chunks() {
            assert_eq!(
                chunk.detail, expected,
                "chunk {:?} at detail {}, expected {}",
                chunk.pos, chunk.detail, expected
            );
        }
    }

    /// Assert one live surface per chunk, the steady-state invariant.
    pub fn assert_one_surface_per_chunk(&self) {
        let expected = self.world.config().width * self.world.config().height;
        assert_eq!(
            self.backend.live_count(),
            expected,
            "expected one live surface per chunk"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_backend_tracks_live_surfaces() {
        let mut backend = RecordingBackend::new();
        let mesh = MeshData::default();
        let a = backend.create_surface(ChunkPos::new(0, 0), &mesh);
        let b = backend.create_surface(ChunkPos::new(1, 0), &mesh);
        assert_eq!(backend.live_count(), 2);
        assert_ne!(a, b, "handles must be unique");

        backend.destroy_surface(a);
        assert_eq!(backend.live_count(), 1);
        assert_eq!(backend.created_count(), 2);
        assert_eq!(backend.destroyed_count(), 1);
    }

    #[test]
    #[should_panic(expected = "unknown or dead surface")]
    fn test_double_destroy_panics() {
        let mut backend = RecordingBackend::new();
        let handle = backend.create_surface(ChunkPos::new(0, 0), &MeshData::default());
        backend.destroy_surface(handle);
        backend.destroy_surface(handle);
    }

    #[test]
    fn test_transform_of_returns_latest() {
        let mut backend = RecordingBackend::new();
        let handle = backend.create_surface(ChunkPos::new(0, 0), &MeshData::default());
        backend.set_transform(handle, Vec3::ZERO, Vec3::ONE);
        backend.set_transform(handle, Vec3::X, Vec3::splat(2.0));
        assert_eq!(backend.transform_of(handle), Some((Vec3::X, Vec3::splat(2.0))));
    }

    #[test]
    fn test_overhead_view_footprint_scales_with_height() {
        let near = overhead_view(Vec2::splat(32.0), 50.0);
        let far = overhead_view(Vec2::splat(32.0), 500.0);
        let near_w = near.ground_max.x - near.ground_min.x;
        let far_w = far.ground_max.x - far.ground_min.x;
        assert!(far_w > near_w, "higher camera must see a wider footprint");
    }
}
