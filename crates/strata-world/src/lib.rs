//! Chunk addressing, density grids, and procedural density generation.
#![forbid(unsafe_code)]

pub mod voxel;
pub mod worldgen;

pub use voxel::{
    ChunkCoord, DensityGrid, DensitySource, GenCtx, MaterialId, World, WorldGenMode,
};

/// Default number of cells along each chunk edge.
pub const CHUNK_SIZE: usize = 32;

/// Density threshold separating empty (below) from solid (at or above).
pub const ISOLEVEL: f32 = 0.5;
