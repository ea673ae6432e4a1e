//! Chunk streaming around a moving focus point, backed by a density cache.
#![forbid(unsafe_code)]

mod density_cache;
mod offsets;
mod streamer;

pub use density_cache::{DensityCache, DensityCacheStats};
pub use offsets::spherical_offsets;
pub use streamer::{ChunkStreamer, StreamConfig, StreamStats, TickReport};

/// Default streaming radius in chunks.
pub const DEFAULT_RENDER_DISTANCE: i32 = 6;

/// Default number of chunk loads performed per tick.
pub const DEFAULT_LOAD_BUDGET: usize = 1;
