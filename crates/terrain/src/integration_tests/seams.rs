//! Chunk border continuity: neighboring heightmaps must agree on shared
//! edges, including when the neighbors were built at different details.

use crate::chunk::ChunkPos;
use crate::config::WorldConfig;
use crate::heightmap::HeightmapBuilder;
use crate::noise_field::NoiseField;

const SEAM_EPSILON: f32 = 1e-4;

fn builder() -> HeightmapBuilder {
    let config = WorldConfig {
        width: 4,
        height: 4,
        chunk_size: 16,
        ..Default::default()
    };
    let noise = NoiseField::new(&config).expect("default noise params are valid");
    HeightmapBuilder::new(noise, &config)
}

#[test]
fn horizontal_neighbors_share_their_border_column() {
    let builder = builder();
    let left = builder.build(ChunkPos::new(0, 0), 1.0);
    let right = builder.build(ChunkPos::new(1, 0), 1.0);

    let r = left.resolution();
    for ty in 0..=r {
        let a = left.get(r, ty);
        let b = right.get(0, ty);
        assert!(
            (a - b).abs() < SEAM_EPSILON,
            "border row {ty}: left edge {a} != right edge {b}"
        );
    }
}

#[test]
fn vertical_neighbors_share_their_border_row() {
    let builder = builder();
    let top = builder.build(ChunkPos::new(2, 1), 1.0);
    let bottom = builder.build(ChunkPos::new(2, 2), 1.0);

    let r = top.resolution();
    for tx in 0..=r {
        let a = top.get(tx, r);
        let b = bottom.get(tx, 0);
        assert!(
            (a - b).abs() < SEAM_EPSILON,
            "border column {tx}: top edge {a} != bottom edge {b}"
        );
    }
}

#[test]
fn border_samples_agree_across_detail_levels() {
    let builder = builder();
    let fine = builder.build(ChunkPos::new(0, 0), 1.0);
    let coarse = builder.build(ChunkPos::new(1, 0), 0.5);

    // The coarse neighbor has half the samples; every one of its border
    // samples lands on a world position the fine grid also sampled.
    let fine_r = fine.resolution();
    let coarse_r = coarse.resolution();
    assert_eq!(fine_r, 2 * coarse_r);

    for ty in 0..=coarse_r {
        let a = fine.get(fine_r, ty * 2);
        let b = coarse.get(0, ty);
        assert!(
            (a - b).abs() < SEAM_EPSILON,
            "mixed-detail seam at coarse row {ty}: {a} != {b}"
        );
    }
}

#[test]
fn corner_shared_by_four_chunks_agrees() {
    let builder = builder();
    let details = [1.0, 1.0, 0.5, 0.25];
    let chunks = [
        ChunkPos::new(0, 0),
        ChunkPos::new(1, 0),
        ChunkPos::new(0, 1),
        ChunkPos::new(1, 1),
    ];

    // World point (16, 16) seen from each chunk's corner sample.
    let heights: Vec<f32> = chunks
        .iter()
        .zip(details)
        .map(|(&pos, detail)| {
            let grid = builder.build(pos, detail);
            let r = grid.resolution();
            match (pos.x, pos.y) {
                (0, 0) => grid.get(r, r),
                (1, 0) => grid.get(0, r),
                (0, 1) => grid.get(r, 0),
                _ => grid.get(0, 0),
            }
        })
        .collect();

    for h in &heights[1..] {
        assert!(
            (h - heights[0]).abs() < SEAM_EPSILON,
            "four-way corner disagrees: {heights:?}"
        );
    }
}
