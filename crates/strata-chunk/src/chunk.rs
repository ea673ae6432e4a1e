use std::sync::Arc;
use std::time::Instant;

use strata_geom::{Aabb, Vec3};
use strata_mesh_cpu::{MarchingCubes, collision_triangles};
use strata_world::{ChunkCoord, DensityGrid};

use crate::backend::{BackendError, BodyHandle, MeshHandle, MeshUpload, PhysicsBackend, RenderBackend};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Cell stride for the render mesh.
    pub detail_level: usize,
    /// `None` disables collision. `Some(1)` reuses the render triangles; larger
    /// values re-extract at that stride.
    pub collision_detail: Option<usize>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            detail_level: 1,
            collision_detail: Some(1),
        }
    }
}

/// Result of one [`Chunk::build`]. Backend failures are reported here and leave
/// the chunk without the corresponding resource.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildOutcome {
    pub triangles: usize,
    pub collision_triangles: usize,
    pub render_error: Option<BackendError>,
    pub physics_error: Option<BackendError>,
    pub micros: u128,
}

impl BuildOutcome {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles == 0
    }
}

/// A loaded chunk: shared density data plus the render mesh and static body it owns.
#[derive(Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    grid: Arc<DensityGrid>,
    mesh: Option<MeshHandle>,
    body: Option<BodyHandle>,
    triangles: usize,
}

impl Chunk {
    pub fn new(coord: ChunkCoord, grid: Arc<DensityGrid>) -> Self {
        Self {
            coord,
            grid,
            mesh: None,
            body: None,
            triangles: 0,
        }
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    #[inline]
    pub fn grid(&self) -> &Arc<DensityGrid> {
        &self.grid
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles
    }

    #[inline]
    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }

    #[inline]
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    #[inline]
    pub fn mesh_handle(&self) -> Option<MeshHandle> {
        self.mesh
    }

    #[inline]
    pub fn body_handle(&self) -> Option<BodyHandle> {
        self.body
    }

    #[inline]
    pub fn world_origin(&self) -> Vec3 {
        self.coord.world_origin(self.grid.size())
    }

    /// World-space region covered by this chunk.
    pub fn bounds(&self) -> Aabb {
        Aabb::cube(self.world_origin(), self.grid.size() as f32)
    }

    /// Extracts the surface once and registers it with the collaborators.
    ///
    /// Chunks without triangles register nothing. A render failure does not
    /// prevent the collision body, and the reverse. Rebuilding releases any
    /// resources from a previous build first.
    pub fn build<R, P>(
        &mut self,
        extractor: &MarchingCubes,
        opts: &BuildOptions,
        renderer: &mut R,
        physics: &mut P,
    ) -> BuildOutcome
    where
        R: RenderBackend + ?Sized,
        P: PhysicsBackend + ?Sized,
    {
        let t0 = Instant::now();
        self.destroy(renderer, physics);

        let tris = extractor.generate_mesh(&self.grid, opts.detail_level);
        self.triangles = tris.triangle_count();
        let mut out = BuildOutcome {
            triangles: self.triangles,
            ..BuildOutcome::default()
        };
        if tris.is_empty() {
            out.micros = t0.elapsed().as_micros();
            return out;
        }

        let origin = self.world_origin();
        let bounds = match tris.bounds() {
            Some(b) => Aabb::new(b.min + origin, b.max + origin),
            None => self.bounds(),
        };
        match renderer.upload_mesh(MeshUpload {
            coord: self.coord,
            floats: tris.floats(),
            origin,
            bounds,
        }) {
            Ok(h) => self.mesh = Some(h),
            Err(e) => {
                log::warn!("render upload failed for chunk {}: {}", self.coord, e);
                out.render_error = Some(e);
            }
        }

        if let Some(detail) = opts.collision_detail {
            let collision = if detail == 1 {
                collision_triangles(&tris)
            } else {
                collision_triangles(&extractor.generate_mesh(&self.grid, detail))
            };
            out.collision_triangles = collision.triangle_count();
            if !collision.is_empty() {
                match physics.create_static_body(&collision, origin) {
                    Ok(body) => match physics.add_object(body) {
                        Ok(()) => self.body = Some(body),
                        Err(e) => {
                            physics.remove_body(body);
                            log::warn!("physics activation failed for chunk {}: {}", self.coord, e);
                            out.physics_error = Some(e);
                        }
                    },
                    Err(e) => {
                        log::warn!("physics body failed for chunk {}: {}", self.coord, e);
                        out.physics_error = Some(e);
                    }
                }
            }
        }

        out.micros = t0.elapsed().as_micros();
        out
    }

    /// Issues a draw for the render mesh, if any. Returns whether a draw was issued.
    pub fn render<R: RenderBackend + ?Sized>(&self, renderer: &mut R) -> bool {
        match self.mesh {
            Some(h) => {
                renderer.draw(h, self.world_origin());
                true
            }
            None => false,
        }
    }

    /// Releases the render mesh and physics body. Safe to call repeatedly.
    pub fn destroy<R, P>(&mut self, renderer: &mut R, physics: &mut P)
    where
        R: RenderBackend + ?Sized,
        P: PhysicsBackend + ?Sized,
    {
        if let Some(h) = self.mesh.take() {
            renderer.release_mesh(h);
        }
        if let Some(b) = self.body.take() {
            physics.remove_body(b);
        }
    }
}
