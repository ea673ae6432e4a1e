use strata_geom::{Aabb, Vec3};
use strata_mesh_cpu::CollisionMesh;
use strata_world::ChunkCoord;

use crate::material::MaterialBinding;

/// Renderer-owned mesh resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u64);

/// Physics-owned static rigid body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendError {
    /// Vertex data is not a whole number of 7-float triangle records.
    InvalidMesh,
    EmptyMesh,
    Rejected(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::InvalidMesh => write!(f, "invalid mesh data"),
            BackendError::EmptyMesh => write!(f, "mesh has no triangles"),
            BackendError::Rejected(msg) => write!(f, "backend rejected request: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

/// Vertex data and placement for one chunk's render mesh.
#[derive(Clone, Copy, Debug)]
pub struct MeshUpload<'a> {
    pub coord: ChunkCoord,
    /// `[x, y, z, nx, ny, nz, material]` records in chunk-local space.
    pub floats: &'a [f32],
    /// World-space translation applied to the local vertices.
    pub origin: Vec3,
    /// World-space bounds of the mesh.
    pub bounds: Aabb,
}

pub trait RenderBackend {
    fn upload_mesh(&mut self, upload: MeshUpload<'_>) -> Result<MeshHandle, BackendError>;
    fn release_mesh(&mut self, handle: MeshHandle);
    fn bind_material(&mut self, binding: &MaterialBinding);
    fn draw(&mut self, handle: MeshHandle, origin: Vec3);
}

pub trait PhysicsBackend {
    /// Creates an inactive static body from positions-only triangles placed at `origin`.
    fn create_static_body(
        &mut self,
        mesh: &CollisionMesh,
        origin: Vec3,
    ) -> Result<BodyHandle, BackendError>;
    /// Activates a body in the simulation.
    fn add_object(&mut self, body: BodyHandle) -> Result<(), BackendError>;
    /// Deactivates and destroys a body. Unknown handles are ignored.
    fn remove_body(&mut self, body: BodyHandle);
}
