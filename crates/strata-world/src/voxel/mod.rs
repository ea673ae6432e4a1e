mod chunk_coord;
mod density;
mod gen_ctx;
pub mod generation;
mod world;

pub use chunk_coord::ChunkCoord;
pub use density::{DensityGrid, MaterialId};
pub use gen_ctx::GenCtx;
pub use world::{DensitySource, World, WorldGenMode};
