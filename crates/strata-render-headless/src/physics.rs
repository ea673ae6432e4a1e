use hashbrown::{HashMap, HashSet};

use strata_chunk::{BackendError, BodyHandle, PhysicsBackend};
use strata_geom::Vec3;
use strata_mesh_cpu::CollisionMesh;

#[derive(Clone, Debug, PartialEq)]
pub struct StaticBody {
    pub origin: Vec3,
    pub triangles: usize,
}

/// Static body table with an active set, standing in for a physics engine.
#[derive(Debug, Default)]
pub struct HeadlessPhysics {
    next_id: u64,
    bodies: HashMap<BodyHandle, StaticBody>,
    active: HashSet<BodyHandle>,
    fail_creates: usize,
    reject_all: bool,
}

impl HeadlessPhysics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `n` body creations fail.
    pub fn fail_next_creates(&mut self, n: usize) {
        self.fail_creates = n;
    }

    pub fn set_reject_all(&mut self, reject: bool) {
        self.reject_all = reject;
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, body: BodyHandle) -> bool {
        self.active.contains(&body)
    }

    pub fn body(&self, body: BodyHandle) -> Option<&StaticBody> {
        self.bodies.get(&body)
    }

    pub fn has_body_at(&self, origin: Vec3) -> bool {
        self.bodies.values().any(|b| b.origin == origin)
    }
}

impl PhysicsBackend for HeadlessPhysics {
    fn create_static_body(
        &mut self,
        mesh: &CollisionMesh,
        origin: Vec3,
    ) -> Result<BodyHandle, BackendError> {
        if self.reject_all {
            return Err(BackendError::Rejected("physics disabled".to_string()));
        }
        if self.fail_creates > 0 {
            self.fail_creates -= 1;
            return Err(BackendError::Rejected("injected body failure".to_string()));
        }
        if mesh.is_empty() {
            return Err(BackendError::EmptyMesh);
        }
        let n = mesh.vertices.len() as u32;
        if mesh.indices.iter().flatten().any(|&i| i >= n) {
            return Err(BackendError::InvalidMesh);
        }
        self.next_id += 1;
        let handle = BodyHandle(self.next_id);
        self.bodies.insert(
            handle,
            StaticBody {
                origin,
                triangles: mesh.triangle_count(),
            },
        );
        Ok(handle)
    }

    fn add_object(&mut self, body: BodyHandle) -> Result<(), BackendError> {
        if !self.bodies.contains_key(&body) {
            return Err(BackendError::Rejected(format!("unknown body {:?}", body)));
        }
        self.active.insert(body);
        Ok(())
    }

    fn remove_body(&mut self, body: BodyHandle) {
        self.active.remove(&body);
        self.bodies.remove(&body);
    }
}
