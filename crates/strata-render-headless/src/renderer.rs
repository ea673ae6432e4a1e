use hashbrown::{HashMap, HashSet};

use strata_chunk::{BackendError, MaterialBinding, MeshHandle, MeshUpload, RenderBackend};
use strata_geom::{Aabb, Vec3};
use strata_mesh_cpu::FLOATS_PER_TRIANGLE;
use strata_world::ChunkCoord;

#[derive(Clone, Debug, PartialEq)]
pub struct UploadedMesh {
    pub coord: ChunkCoord,
    pub triangles: usize,
    pub origin: Vec3,
    pub bounds: Aabb,
}

/// Keeps uploaded meshes in a handle table and counts draw calls.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    next_id: u64,
    meshes: HashMap<MeshHandle, UploadedMesh>,
    bound: Option<MaterialBinding>,
    reject: HashSet<ChunkCoord>,
    reject_all: bool,
    pub draw_calls: u64,
    pub material_binds: u64,
    pub uploads: u64,
    pub releases: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later upload for `coord` fail.
    pub fn reject_uploads_for(&mut self, coord: ChunkCoord) {
        self.reject.insert(coord);
    }

    pub fn set_reject_all(&mut self, reject: bool) {
        self.reject_all = reject;
    }

    #[inline]
    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&UploadedMesh> {
        self.meshes.get(&handle)
    }

    pub fn has_mesh_for(&self, coord: ChunkCoord) -> bool {
        self.meshes.values().any(|m| m.coord == coord)
    }

    pub fn bound_material(&self) -> Option<&MaterialBinding> {
        self.bound.as_ref()
    }

    pub fn total_triangles(&self) -> usize {
        self.meshes.values().map(|m| m.triangles).sum()
    }
}

impl RenderBackend for HeadlessRenderer {
    fn upload_mesh(&mut self, upload: MeshUpload<'_>) -> Result<MeshHandle, BackendError> {
        if self.reject_all || self.reject.contains(&upload.coord) {
            return Err(BackendError::Rejected(format!(
                "upload refused for chunk {}",
                upload.coord
            )));
        }
        if upload.floats.is_empty() {
            return Err(BackendError::EmptyMesh);
        }
        if upload.floats.len() % FLOATS_PER_TRIANGLE != 0 {
            return Err(BackendError::InvalidMesh);
        }
        self.next_id += 1;
        let handle = MeshHandle(self.next_id);
        self.meshes.insert(
            handle,
            UploadedMesh {
                coord: upload.coord,
                triangles: upload.floats.len() / FLOATS_PER_TRIANGLE,
                origin: upload.origin,
                bounds: upload.bounds,
            },
        );
        self.uploads += 1;
        Ok(handle)
    }

    fn release_mesh(&mut self, handle: MeshHandle) {
        if self.meshes.remove(&handle).is_some() {
            self.releases += 1;
        } else {
            log::warn!("release of unknown mesh handle {:?}", handle);
        }
    }

    fn bind_material(&mut self, binding: &MaterialBinding) {
        self.bound = Some(binding.clone());
        self.material_binds += 1;
    }

    fn draw(&mut self, handle: MeshHandle, _origin: Vec3) {
        if self.meshes.contains_key(&handle) {
            self.draw_calls += 1;
        } else {
            log::warn!("draw of unknown mesh handle {:?}", handle);
        }
    }
}
