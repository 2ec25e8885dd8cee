//! # TerrainWorld — chunk ownership and the streaming tick
//!
//! The world owns every chunk for its whole lifetime; streaming never creates
//! or frees chunks, it only regenerates their geometry at different detail
//! levels. "Unloading" a chunk means dropping it back to the coarse baseline,
//! so the full terrain stays on screen at every altitude.

use std::time::Instant;

use bevy::prelude::*;

use crate::chunk::{Chunk, ChunkPos};
use crate::config::{MeshShading, WorldConfig};
use crate::error::WorldConfigError;
use crate::heightmap::HeightmapBuilder;
use crate::mesh::{synthesize_flat, synthesize_smooth};
use crate::noise_field::NoiseField;
use crate::streaming::{detail_for_height, visible_window, CameraView, ChunkWindow, TickReport};
use crate::surface::SurfaceBackend;

/// Window and detail of the last tick that did (or skipped) work; the next
/// tick short-circuits when both are unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TickMemo {
    window: ChunkWindow,
    detail: f32,
}

/// The whole streamed terrain: config, generators, and the chunk grid in
/// row-major order.
#[derive(Resource)]
pub struct TerrainWorld {
    config: WorldConfig,
    builder: HeightmapBuilder,
    chunks: Vec<Chunk>,
    previous: Option<TickMemo>,
}

impl TerrainWorld {
    /// Validate the config, then generate every chunk at the baseline detail
    /// with an initial surface. After this returns the world is fully
    /// renderable; ticks only swap detail levels.
    pub fn generate(
        config: WorldConfig,
        backend: &mut dyn SurfaceBackend,
    ) -> Result<Self, WorldConfigError> {
        config.validate()?;
        let started = Instant::now();

        let noise = NoiseField::new(&config)?;
        let builder = HeightmapBuilder::new(noise, &config);
        let chunks = (0..config.height)
            .flat_map(|y| (0..config.width).map(move |x| Chunk::unloaded(ChunkPos::new(x, y))))
            .collect();

        let mut world = Self {
            config,
            builder,
            chunks,
            previous: None,
        };

        let baseline = world.config.min_detail();
        for y in 0..world.config.height {
            for x in 0..world.config.width {
                world.regenerate(ChunkPos::new(x, y), baseline, backend);
            }
        }

        info!(
            "Generated {}x{} chunk world (seed {}) in {:?}",
            world.config.width,
            world.config.height,
            world.config.seed,
            started.elapsed()
        );
        Ok(world)
    }

    // ------- accessors -------

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The noise field the heightmaps sample from, for collaborators that
    /// render directly from noise (the overview texture).
    pub fn noise(&self) -> &NoiseField {
        self.builder.noise()
    }

    pub fn chunk(&self, pos: ChunkPos) -> &Chunk {
        &self.chunks[self.index(pos)]
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    #[inline]
    fn index(&self, pos: ChunkPos) -> usize {
        debug_assert!(
            pos.x < self.config.width && pos.y < self.config.height,
            "chunk position {pos:?} outside {}x{} world",
            self.config.width,
            self.config.height
        );
        pos.y * self.config.width + pos.x
    }

    // ------- streaming tick -------

    /// Advance streaming one tick against the given camera view.
    ///
    /// Chunks that left the visible window fall back to the baseline detail,
    /// chunks inside it are regenerated at the height-derived target detail,
    /// and chunks already at their required detail are left alone. A tick
    /// whose window and target both match the previous tick returns without
    /// touching any chunk.
    pub fn tick(&mut self, view: &CameraView, backend: &mut dyn SurfaceBackend) -> TickReport {
        let target_detail = detail_for_height(&self.config, view.eye_height);
        let window = visible_window(&self.config, view);

        if let Some(memo) = self.previous {
            if memo.window == window && memo.detail == target_detail {
                return TickReport::default();
            }
        }

        let mut report = TickReport::default();
        let baseline = self.config.min_detail();

        // Chunks that left the window drop to baseline before the new window
        // is refined, so the tick's peak geometry stays bounded.
        if let Some(memo) = self.previous {
            for pos in memo.window.positions() {
                if window.contains(pos) {
                    continue;
                }
                if self.chunks[self.index(pos)].detail != baseline {
                    self.regenerate(pos, baseline, backend);
                    report.downgraded += 1;
                }
            }
        }

        for pos in window.positions() {
            if self.chunks[self.index(pos)].detail != target_detail {
                self.regenerate(pos, target_detail, backend);
                report.refined += 1;
            }
        }

        self.previous = Some(TickMemo {
            window,
            detail: target_detail,
        });

        if !report.is_idle() {
            debug!(
                "Streamed window ({},{})..({},{}) at detail {}: {} refined, {} downgraded",
                window.min.x,
                window.min.y,
                window.max.x,
                window.max.y,
                target_detail,
                report.refined,
                report.downgraded
            );
        }
        report
    }

    /// Rebuild one chunk's heightmap and surface at the given detail.
    ///
    /// The old surface is destroyed before the replacement is created so the
    /// backend never holds two surfaces for one chunk.
    fn regenerate(&mut self, pos: ChunkPos, detail: f32, backend: &mut dyn SurfaceBackend) {
        let grid = self.builder.build(pos, detail);
        let mesh = match self.config.shading {
            MeshShading::Flat => synthesize_flat(&grid, 1.0),
            MeshShading::Smooth => synthesize_smooth(&grid),
        };

        let chunk_size = self.config.chunk_size as f32;
        let unit = chunk_size / grid.resolution() as f32;
        let translation = Vec3::new(pos.x as f32 * chunk_size, 0.0, pos.y as f32 * chunk_size);
        let scale = Vec3::new(unit, 1.0, unit);

        let index = self.index(pos);
        let chunk = &mut self.chunks[index];
        if let Some(old) = chunk.surface.take() {
            backend.destroy_surface(old);
        }
        let handle = backend.create_surface(pos, &mesh);
        backend.set_transform(handle, translation, scale);

        chunk.heights = grid;
        chunk.detail = detail;
        chunk.surface = Some(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::{overhead_view, small_world_config, SurfaceEvent, TestWorld};

    #[test]
    fn test_generate_rejects_invalid_config() {
        let mut config = small_world_config();
        config.octaves = 0;
        let mut backend = crate::test_harness::RecordingBackend::new();
        assert!(
            TerrainWorld::generate(config, &mut backend).is_err(),
            "zero octaves must fail validation before any chunk is generated"
        );
        assert_eq!(backend.created_count(), 0);
    }

    #[test]
    fn test_generate_creates_every_chunk_at_baseline() {
        let tw = TestWorld::small();
        let baseline = tw.world.config().min_detail();
        tw.assert_all_at_detail(baseline);
        tw.assert_one_surface_per_chunk();
        assert!(tw.world.chunks().all(Chunk::is_loaded));
    }

    #[test]
    fn test_generate_surfaces_cover_the_grid_in_row_major_order() {
        let tw = TestWorld::small();
        let positions = tw.backend.created_positions();
        assert_eq!(positions.len(), 16);
        assert_eq!(positions[0], ChunkPos::new(0, 0));
        assert_eq!(positions[1], ChunkPos::new(1, 0));
        assert_eq!(positions[4], ChunkPos::new(0, 1));
        assert_eq!(positions[15], ChunkPos::new(3, 3));
    }

    #[test]
    fn test_surface_transform_spans_one_chunk_footprint() {
        let tw = TestWorld::small();
        let chunk = tw.world.chunk(ChunkPos::new(1, 2));
        let handle = chunk.surface.expect("generated chunk must own a surface");
        let (translation, scale) = tw
            .backend
            .transform_of(handle)
            .expect("every created surface gets a transform");

        // Baseline resolution is one quad, so one grid unit scales to the
        // full 16-unit chunk.
        assert_eq!(translation, Vec3::new(16.0, 0.0, 32.0));
        assert_eq!(scale, Vec3::new(16.0, 1.0, 16.0));
    }

    #[test]
    fn test_tick_refines_window_to_target_detail() {
        let mut tw = TestWorld::small();
        tw.backend.clear_events();

        // Low camera over chunk (1,1): footprint covers that chunk, margin
        // expands the window to (0,0)..(2,2).
        let report = tw.tick_overhead(Vec2::new(24.0, 24.0), 8.0);
        assert_eq!(report.refined, 9);
        assert_eq!(report.downgraded, 0);

        assert_eq!(tw.detail_at(1, 1), 1.0);
        assert_eq!(tw.detail_at(0, 2), 1.0);
        let baseline = tw.world.config().min_detail();
        assert_eq!(tw.detail_at(3, 0), baseline, "chunks outside the window stay coarse");
        assert_eq!(tw.detail_at(3, 3), baseline);
        tw.assert_one_surface_per_chunk();
    }

    #[test]
    fn test_tick_is_idempotent_for_an_unchanged_view() {
        let mut tw = TestWorld::small();
        let view = overhead_view(Vec2::new(24.0, 24.0), 8.0);

        let first = tw.tick_view(&view);
        assert!(!first.is_idle());

        tw.backend.clear_events();
        let second = tw.tick_view(&view);
        assert!(second.is_idle(), "unchanged view must short-circuit");
        assert!(
            tw.backend.events.is_empty(),
            "short-circuited tick must not touch the backend"
        );
    }

    #[test]
    fn test_tick_regenerates_in_destroy_then_create_pairs() {
        let mut tw = TestWorld::small();
        tw.backend.clear_events();

        tw.tick_overhead(Vec2::new(24.0, 24.0), 8.0);

        // Per regenerated chunk the old surface dies before its replacement
        // exists, in adjacent event pairs.
        let mut events = tw.backend.events.iter();
        while let Some(event) = events.next() {
            let SurfaceEvent::Destroyed { .. } = event else {
                continue;
            };
            assert!(
                matches!(events.next(), Some(SurfaceEvent::Created { .. })),
                "every destroy must be followed by the replacement create"
            );
        }
        assert_eq!(tw.backend.destroyed_count(), 9);
        assert_eq!(tw.backend.created_count(), 9);
    }

    #[test]
    fn test_chunks_leaving_the_window_downgrade_to_baseline() {
        let mut tw = TestWorld::small();
        tw.tick_overhead(Vec2::new(24.0, 24.0), 8.0);
        assert_eq!(tw.detail_at(0, 0), 1.0);

        // Jump to the far corner: window becomes (2,2)..(3,3). Chunk (2,2)
        // stays refined, the other eight drop back to baseline.
        let report = tw.tick_overhead(Vec2::new(56.0, 56.0), 8.0);
        assert_eq!(report.downgraded, 8);
        assert_eq!(report.refined, 3);

        let baseline = tw.world.config().min_detail();
        assert_eq!(tw.detail_at(0, 0), baseline);
        assert_eq!(tw.detail_at(1, 1), baseline);
        assert_eq!(tw.detail_at(2, 2), 1.0, "chunk shared by both windows keeps its detail");
        assert_eq!(tw.detail_at(3, 3), 1.0);
        tw.assert_one_surface_per_chunk();
    }

    #[test]
    fn test_high_camera_leaves_baseline_world_untouched() {
        let mut tw = TestWorld::small();
        tw.backend.clear_events();

        // At this height the target detail floors at the baseline, and the
        // whole world is already there.
        let report = tw.tick_overhead(tw.world_center(), 100_000.0);
        assert!(report.is_idle());
        assert!(tw.backend.events.is_empty());
    }

    #[test]
    fn test_camera_outside_the_world_clamps_to_a_border_window() {
        let mut tw = TestWorld::small();

        // Far beyond the +X/+Z corner; must clamp, not index out of range.
        let report = tw.tick_overhead(Vec2::new(5_000.0, 5_000.0), 8.0);
        assert_eq!(report.refined, 4, "margin around the corner chunk stays in bounds");
        assert_eq!(tw.detail_at(3, 3), 1.0);
        assert_eq!(tw.detail_at(2, 2), 1.0);
        tw.assert_one_surface_per_chunk();
    }

    #[test]
    fn test_zooming_out_coarsens_the_window_in_plateaus() {
        let mut tw = TestWorld::small();
        let center = tw.world_center();

        tw.tick_overhead(center, 80.0);
        assert_eq!(tw.detail_at(1, 1), 1.0);

        // full_detail_height = 100, so 400 units up is two halvings.
        tw.tick_overhead(center, 400.0);
        assert_eq!(tw.detail_at(1, 1), 0.25);

        tw.tick_overhead(center, 80.0);
        assert_eq!(tw.detail_at(1, 1), 1.0, "zooming back in restores full detail");
        tw.assert_one_surface_per_chunk();
    }
}
