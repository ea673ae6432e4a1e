use std::sync::Arc;

use crate::worldgen::WorldGenParams;

use super::generation::{cave_factor, height_density, material_at};
use super::{ChunkCoord, DensityGrid, GenCtx, MaterialId};

/// Anything that can produce the density lattice for a chunk coordinate.
///
/// Implementations must be deterministic: the same coordinate always yields
/// the same grid.
pub trait DensitySource {
    /// Cells per chunk edge.
    fn chunk_size(&self) -> usize;

    fn generate_density(&self, coord: ChunkCoord) -> DensityGrid;
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum WorldGenMode {
    Normal,
    /// Level ground crossing the isolevel at `surface_y`, without caves.
    Flat { surface_y: f32 },
}

/// Seeded procedural terrain: fractal heightmap plus optional 3D cave carving.
pub struct World {
    pub chunk_size: usize,
    pub seed: i32,
    pub mode: WorldGenMode,
    pub gen_params: Arc<WorldGenParams>,
}

impl World {
    pub fn new(seed: i32, mode: WorldGenMode, chunk_size: usize) -> Self {
        Self::with_params(seed, mode, chunk_size, WorldGenParams::default())
    }

    pub fn with_params(
        seed: i32,
        mode: WorldGenMode,
        chunk_size: usize,
        params: WorldGenParams,
    ) -> Self {
        assert!(chunk_size > 0, "chunk size must be at least 1");
        Self {
            chunk_size,
            seed,
            mode,
            gen_params: Arc::new(params),
        }
    }

    pub fn make_gen_ctx(&self) -> GenCtx {
        GenCtx::new(self.seed, Arc::clone(&self.gen_params))
    }

    pub fn generate(&self, coord: ChunkCoord) -> DensityGrid {
        let ctx = self.make_gen_ctx();
        self.generate_with_ctx(&ctx, coord)
    }

    pub fn generate_with_ctx(&self, ctx: &GenCtx, coord: ChunkCoord) -> DensityGrid {
        let n = self.chunk_size;
        let dim = n + 1;
        let (bx, by, bz) = coord.base(n);
        let p = &ctx.params;

        let heights: Vec<f32> = match self.mode {
            WorldGenMode::Flat { surface_y } => vec![surface_y; dim * dim],
            WorldGenMode::Normal => {
                let mut h = Vec::with_capacity(dim * dim);
                for z in 0..dim {
                    for x in 0..dim {
                        h.push(ctx.surface_height((bx + x as i32) as f32, (bz + z as i32) as f32));
                    }
                }
                h
            }
        };
        let carve = p.caves_enable && matches!(self.mode, WorldGenMode::Normal);

        let grid = DensityGrid::from_fn(n, |x, y, z| {
            let wx = (bx + x as i32) as f32;
            let wy = (by + y as i32) as f32;
            let wz = (bz + z as i32) as f32;
            let surface = heights[z * dim + x];
            let mut density = height_density(surface, wy, p.height_transition);
            if carve && density > 0.0 {
                let cave = ctx.cave_noise(wx, wy, wz);
                density *= cave_factor(cave, p.cave_threshold, p.cave_transition);
            }
            let material: MaterialId = material_at(wy, surface, p.surface_margin);
            (density, material)
        });
        log::trace!(
            target: "gen",
            "generated chunk {} mode={:?} solid={}/{}",
            coord,
            self.mode,
            grid.solid_count(),
            grid.len()
        );
        grid
    }
}

impl DensitySource for World {
    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn generate_density(&self, coord: ChunkCoord) -> DensityGrid {
        self.generate(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "chunk size")]
    fn zero_chunk_size_is_rejected() {
        let _ = World::new(1, WorldGenMode::Normal, 0);
    }

    #[test]
    fn chunk_size_is_kept_as_given() {
        let world = World::new(1, WorldGenMode::Flat { surface_y: 2.0 }, 3);
        assert_eq!(world.chunk_size(), 3);
        assert_eq!(world.generate(ChunkCoord::new(0, 0, 0)).size(), 3);
    }
}
