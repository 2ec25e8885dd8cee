//! Whole-journey streaming scenarios on the canned 4x4 world.

use bevy::prelude::*;

use crate::chunk::ChunkPos;
use crate::streaming::CameraView;
use crate::test_harness::TestWorld;

// ===========================================================================
// 1. Altitude scenario: a 4x4 world, camera above chunk (1,1)
// ===========================================================================

#[test]
fn low_altitude_streams_finer_detail_than_high_altitude() {
    let over_chunk_1_1 = Vec2::new(24.0, 24.0);

    let mut low = TestWorld::small();
    low.tick_overhead(over_chunk_1_1, 8.0);

    let mut high = TestWorld::small();
    high.tick_overhead(over_chunk_1_1, 400.0);

    let low_detail = low.detail_at(1, 1);
    let high_detail = high.detail_at(1, 1);
    let baseline = low.world.config().min_detail();

    assert!(
        low_detail > high_detail,
        "low camera must stream finer: {low_detail} vs {high_detail}"
    );
    assert!(high_detail > baseline, "high camera still refines above baseline");
}

#[test]
fn high_altitude_window_covers_the_low_altitude_window() {
    let over_chunk_1_1 = Vec2::new(24.0, 24.0);

    let mut low = TestWorld::small();
    low.backend.clear_events();
    low.tick_overhead(over_chunk_1_1, 8.0);
    let low_refined = low.backend.created_positions();

    let mut high = TestWorld::small();
    high.backend.clear_events();
    high.tick_overhead(over_chunk_1_1, 400.0);
    let high_refined = high.backend.created_positions();

    assert!(!low_refined.is_empty());
    for pos in &low_refined {
        assert!(
            high_refined.contains(pos),
            "chunk {pos:?} refined at low altitude but missed at high"
        );
    }
    assert!(
        high_refined.len() > low_refined.len(),
        "the wider high-altitude footprint must refine strictly more chunks"
    );
}

// ===========================================================================
// 2. Camera journeys
// ===========================================================================

#[test]
fn panning_across_the_world_keeps_one_surface_per_chunk() {
    let mut tw = TestWorld::small();

    for step in 0..8 {
        let center = Vec2::new(4.0 + step as f32 * 8.0, 24.0);
        tw.tick_overhead(center, 8.0);
        tw.assert_one_surface_per_chunk();
        assert!(
            tw.world.chunks().all(|c| c.is_loaded()),
            "every chunk stays loaded throughout the pan"
        );
    }
}

#[test]
fn chunks_left_behind_by_a_pan_return_to_baseline() {
    let mut tw = TestWorld::small();
    let baseline = tw.world.config().min_detail();

    tw.tick_overhead(Vec2::new(8.0, 8.0), 8.0);
    assert_eq!(tw.detail_at(0, 0), 1.0);

    tw.tick_overhead(Vec2::new(56.0, 56.0), 8.0);
    assert_eq!(
        tw.detail_at(0, 0),
        baseline,
        "chunk behind the camera must drop to baseline, not unload"
    );
    assert!(tw.world.chunk(ChunkPos::new(0, 0)).is_loaded());
}

#[test]
fn zoom_cycle_returns_the_world_to_its_refined_state() {
    let mut tw = TestWorld::small();
    let center = tw.world_center();

    tw.tick_overhead(center, 80.0);
    let refined: Vec<f32> = tw.world.chunks().map(|c| c.detail).collect();

    tw.tick_overhead(center, 3_000.0);
    tw.tick_overhead(center, 80.0);
    let after_cycle: Vec<f32> = tw.world.chunks().map(|c| c.detail).collect();

    assert_eq!(refined, after_cycle, "zoom out and back must restore details");
}

// ===========================================================================
// 3. Degenerate views
// ===========================================================================

#[test]
fn default_view_is_safe_before_any_camera_exists() {
    let mut tw = TestWorld::small();
    tw.backend.clear_events();

    // The default view is infinitely high with an empty footprint; a fresh
    // baseline world has nothing to do for it.
    let report = tw.world.tick(&CameraView::default(), &mut tw.backend);
    assert!(report.is_idle());
    assert!(tw.backend.events.is_empty());
}

#[test]
fn view_far_outside_the_world_never_panics() {
    let mut tw = TestWorld::small();
    for center in [
        Vec2::new(-10_000.0, -10_000.0),
        Vec2::new(10_000.0, -10_000.0),
        Vec2::new(-10_000.0, 10_000.0),
        Vec2::new(10_000.0, 10_000.0),
    ] {
        tw.tick_overhead(center, 8.0);
        tw.assert_one_surface_per_chunk();
    }
}
