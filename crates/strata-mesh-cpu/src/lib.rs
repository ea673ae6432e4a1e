//! CPU isosurface extraction: Marching Cubes over chunk density grids.
#![forbid(unsafe_code)]

mod collision;
mod marching;
mod mesh_build;
pub mod tables;

pub use collision::{CollisionMesh, collision_triangles};
pub use marching::MarchingCubes;
pub use mesh_build::{FLOATS_PER_TRIANGLE, FLOATS_PER_VERTEX, TriangleBuffer};
