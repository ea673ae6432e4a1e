//! Loaded chunk entity and the renderer/physics collaborator contracts.
#![forbid(unsafe_code)]

mod backend;
mod chunk;
mod material;

pub use backend::{BackendError, BodyHandle, MeshHandle, MeshUpload, PhysicsBackend, RenderBackend};
pub use chunk::{BuildOptions, BuildOutcome, Chunk};
pub use material::{ChunkMaterial, MaterialBinding, ShaderKind, TextureSlot};
