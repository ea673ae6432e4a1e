//! In-memory renderer and physics collaborators for headless runs and tests.
#![forbid(unsafe_code)]

mod physics;
mod renderer;

pub use physics::{HeadlessPhysics, StaticBody};
pub use renderer::{HeadlessRenderer, UploadedMesh};
