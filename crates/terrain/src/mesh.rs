//! Triangulation of height grids into renderable geometry.
//!
//! Both modes keep positions in grid units (x = sample column, y = height,
//! z = sample row); the streaming controller scales the surface transform so
//! the mesh spans exactly one chunk footprint at any resolution. Winding
//! faces +Y.

use crate::heightmap::HeightGrid;

/// Engine-agnostic mesh geometry: positions, normals, UVs and a `u32`
/// triangle-list index buffer.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Triangulate with six unique vertices per cell, two triangles, no sharing.
///
/// Every triangle keeps the face normal its three private vertices compute
/// to, which is what produces the faceted look. `stride_detail` in `(0, 1]`
/// additionally skips cells at a stride of `floor(1 / stride_detail)`,
/// independent of the grid's own resolution, for preview geometry; only
/// complete cells are emitted, so a stride that does not divide the
/// resolution drops the partial cells at the far edge.
///
/// # Panics
///
/// Panics when `stride_detail` is outside `(0, 1]` or the stride exceeds the
/// grid resolution. Both are programming errors in the caller, not states to
/// recover from.
pub fn synthesize_flat(grid: &HeightGrid, stride_detail: f32) -> MeshData {
    assert!(
        stride_detail > 0.0 && stride_detail <= 1.0,
        "stride detail must be in (0, 1], got {stride_detail}"
    );
    let resolution = grid.resolution();
    let stride = ((1.0 / stride_detail).floor() as usize).max(1);
    assert!(
        stride <= resolution,
        "stride {stride} exceeds height grid resolution {resolution}"
    );

    let cells = resolution / stride;
    let mut mesh = MeshData {
        positions: Vec::with_capacity(cells * cells * 6),
        normals: Vec::new(),
        uvs: Vec::with_capacity(cells * cells * 6),
        indices: Vec::with_capacity(cells * cells * 6),
    };

    let extent = resolution as f32;
    for cz in 0..cells {
        let z0 = cz * stride;
        let z1 = z0 + stride;
        for cx in 0..cells {
            let x0 = cx * stride;
            let x1 = x0 + stride;

            // Two triangles per cell, corners pulled straight from the grid.
            let corners = [
                (x0, z0),
                (x0, z1),
                (x1, z0),
                (x0, z1),
                (x1, z1),
                (x1, z0),
            ];
            for (x, z) in corners {
                let index = mesh.positions.len() as u32;
                mesh.positions.push([x as f32, grid.get(x, z), z as f32]);
                mesh.uvs.push([x as f32 / extent, z as f32 / extent]);
                mesh.indices.push(index);
            }
        }
    }

    mesh.normals = recalculate_normals(&mesh.positions, &mesh.indices);
    mesh
}

/// Triangulate with one shared vertex per grid sample.
///
/// Emits exactly `(R + 1)^2` vertices and `6 * R * R` indices at the grid's
/// full resolution; shared vertices average their face normals, giving the
/// continuous smooth-shaded look.
pub fn synthesize_smooth(grid: &HeightGrid) -> MeshData {
    let resolution = grid.resolution();
    let side = grid.side();
    let extent = resolution as f32;

    let mut mesh = MeshData {
        positions: Vec::with_capacity(side * side),
        normals: Vec::new(),
        uvs: Vec::with_capacity(side * side),
        indices: Vec::with_capacity(resolution * resolution * 6),
    };

    for z in 0..side {
        for x in 0..side {
            mesh.positions.push([x as f32, grid.get(x, z), z as f32]);
            mesh.uvs.push([x as f32 / extent, z as f32 / extent]);
        }
    }

    for z in 0..resolution {
        for x in 0..resolution {
            let vi = (z * side + x) as u32;
            let row = side as u32;
            mesh.indices.push(vi);
            mesh.indices.push(vi + row);
            mesh.indices.push(vi + 1);
            mesh.indices.push(vi + 1);
            mesh.indices.push(vi + row);
            mesh.indices.push(vi + row + 1);
        }
    }

    mesh.normals = recalculate_normals(&mesh.positions, &mesh.indices);
    mesh
}

/// Per-vertex normals from face-normal accumulation.
///
/// Each triangle contributes its unnormalized cross product to its three
/// vertices, so larger faces weigh more, then every sum is normalized.
/// Vertices with no face area fall back to +Y.
fn recalculate_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accumulated = vec![[0.0_f32; 3]; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [
            positions[tri[0] as usize],
            positions[tri[1] as usize],
            positions[tri[2] as usize],
        ];
        let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        let face = [
            u[1] * v[2] - u[2] * v[1],
            u[2] * v[0] - u[0] * v[2],
            u[0] * v[1] - u[1] * v[0],
        ];
        for &vertex in tri {
            let n = &mut accumulated[vertex as usize];
            n[0] += face[0];
            n[1] += face[1];
            n[2] += face[2];
        }
    }

    accumulated
        .into_iter()
        .map(|[x, y, z]| {
            let len = (x * x + y * y + z * z).sqrt();
            if len < 1e-8 {
                [0.0, 1.0, 0.0]
            } else {
                [x / len, y / len, z / len]
            }
        })
        .collect()
}
