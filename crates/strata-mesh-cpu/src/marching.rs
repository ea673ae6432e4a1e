use strata_geom::Vec3;
use strata_world::{DensityGrid, ISOLEVEL};

use crate::mesh_build::TriangleBuffer;
use crate::tables::{CORNER_OFFSETS, EDGE_CORNERS, EDGE_TABLE, TRI_TABLE};

const INTERP_EPSILON: f32 = 1e-5;

/// Marching Cubes extractor for a fixed isolevel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchingCubes {
    isolevel: f32,
}

impl Default for MarchingCubes {
    fn default() -> Self {
        Self::new(ISOLEVEL)
    }
}

impl MarchingCubes {
    pub const fn new(isolevel: f32) -> Self {
        Self { isolevel }
    }

    #[inline]
    pub fn isolevel(&self) -> f32 {
        self.isolevel
    }

    /// 8-bit case index; bit `i` is set when corner `i` lies below the isolevel.
    #[inline]
    pub fn case_index(&self, corners: &[f32; 8]) -> usize {
        let mut idx = 0usize;
        for (i, &v) in corners.iter().enumerate() {
            if v < self.isolevel {
                idx |= 1 << i;
            }
        }
        idx
    }

    /// Point on segment `p1..p2` where the linearly interpolated value equals the isolevel.
    pub fn interpolate_edge(&self, p1: Vec3, p2: Vec3, v1: f32, v2: f32) -> Vec3 {
        if (self.isolevel - v1).abs() < INTERP_EPSILON {
            return p1;
        }
        if (self.isolevel - v2).abs() < INTERP_EPSILON {
            return p2;
        }
        if (v1 - v2).abs() < INTERP_EPSILON {
            return p1;
        }
        let mu = (self.isolevel - v1) / (v2 - v1);
        p1.lerp(p2, mu)
    }

    /// Extracts the isosurface of `grid` as a flat triangle list in chunk-local space.
    ///
    /// `detail_level` is the cell stride: `size / detail_level` cells per axis,
    /// each spanning `detail_level` lattice units. Strides above 1 are coarser
    /// and do not stitch with neighbouring chunks.
    ///
    /// Panics if `detail_level` is zero.
    pub fn generate_mesh(&self, grid: &DensityGrid, detail_level: usize) -> TriangleBuffer {
        let mut out = TriangleBuffer::new();
        self.generate_mesh_into(grid, detail_level, &mut out);
        out
    }

    /// Like [`generate_mesh`](Self::generate_mesh) but appends into a caller-owned buffer.
    pub fn generate_mesh_into(&self, grid: &DensityGrid, detail_level: usize, out: &mut TriangleBuffer) {
        assert!(detail_level > 0, "detail level must be at least 1");
        let step = detail_level;
        let cells = grid.size() / step;
        if cells == 0 {
            return;
        }
        let scale = step as f32;
        let mut values = [0.0f32; 8];
        let mut corners = [Vec3::ZERO; 8];
        let mut edge_points = [Vec3::ZERO; 12];

        for cy in 0..cells {
            for cz in 0..cells {
                for cx in 0..cells {
                    let (bx, by, bz) = (cx * step, cy * step, cz * step);
                    for (i, off) in CORNER_OFFSETS.iter().enumerate() {
                        values[i] = grid.density(
                            bx + off[0] * step,
                            by + off[1] * step,
                            bz + off[2] * step,
                        );
                    }
                    let case = self.case_index(&values);
                    let edges = EDGE_TABLE[case];
                    if edges == 0 {
                        continue;
                    }
                    for (i, off) in CORNER_OFFSETS.iter().enumerate() {
                        corners[i] = Vec3::new(
                            (cx + off[0]) as f32 * scale,
                            (cy + off[1]) as f32 * scale,
                            (cz + off[2]) as f32 * scale,
                        );
                    }
                    for (e, [a, b]) in EDGE_CORNERS.iter().copied().enumerate() {
                        if edges & (1 << e) != 0 {
                            edge_points[e] =
                                self.interpolate_edge(corners[a], corners[b], values[a], values[b]);
                        }
                    }
                    let material = grid.material(bx, by, bz).as_f32();
                    for tri in TRI_TABLE[case].chunks_exact(3) {
                        if tri[0] < 0 {
                            break;
                        }
                        out.push_triangle(
                            edge_points[tri[0] as usize],
                            edge_points[tri[1] as usize],
                            edge_points[tri[2] as usize],
                            material,
                        );
                    }
                }
            }
        }
        log::trace!(
            target: "mesh",
            "marching cubes: {} cells/axis stride {} -> {} tris",
            cells,
            step,
            out.triangle_count()
        );
    }
}
