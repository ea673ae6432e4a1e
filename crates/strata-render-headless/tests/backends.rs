use strata_chunk::{
    BackendError, ChunkMaterial, MeshHandle, MeshUpload, PhysicsBackend, RenderBackend,
};
use strata_geom::{Aabb, Vec3};
use strata_mesh_cpu::{CollisionMesh, FLOATS_PER_TRIANGLE};
use strata_render_headless::{HeadlessPhysics, HeadlessRenderer};
use strata_world::ChunkCoord;

fn upload(coord: ChunkCoord, floats: &[f32]) -> MeshUpload<'_> {
    MeshUpload {
        coord,
        floats,
        origin: Vec3::ZERO,
        bounds: Aabb::cube(Vec3::ZERO, 1.0),
    }
}

#[test]
fn renderer_validates_and_tracks_meshes() {
    let mut r = HeadlessRenderer::new();
    let c = ChunkCoord::new(1, 0, 0);
    assert_eq!(r.upload_mesh(upload(c, &[])), Err(BackendError::EmptyMesh));
    assert_eq!(r.upload_mesh(upload(c, &[0.0; 20])), Err(BackendError::InvalidMesh));

    let floats = vec![0.0; FLOATS_PER_TRIANGLE * 2];
    let h = r.upload_mesh(upload(c, &floats)).unwrap();
    assert_eq!(r.mesh(h).unwrap().triangles, 2);
    assert!(r.has_mesh_for(c));

    r.bind_material(&ChunkMaterial::default().bind());
    r.draw(h, Vec3::ZERO);
    r.draw(MeshHandle(999), Vec3::ZERO);
    assert_eq!(r.draw_calls, 1);
    assert_eq!(r.material_binds, 1);

    r.release_mesh(h);
    assert_eq!(r.live_meshes(), 0);
    assert_eq!(r.releases, 1);
}

#[test]
fn renderer_rejects_injected_coords() {
    let mut r = HeadlessRenderer::new();
    let bad = ChunkCoord::new(0, 0, 0);
    r.reject_uploads_for(bad);
    let floats = vec![0.0; FLOATS_PER_TRIANGLE];
    assert!(matches!(r.upload_mesh(upload(bad, &floats)), Err(BackendError::Rejected(_))));
    assert!(r.upload_mesh(upload(ChunkCoord::new(0, 1, 0), &floats)).is_ok());
}

#[test]
fn physics_bodies_activate_and_remove() {
    let mut p = HeadlessPhysics::new();
    let mesh = CollisionMesh {
        vertices: vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
        indices: vec![[0, 1, 2]],
    };
    assert_eq!(
        p.create_static_body(&CollisionMesh::default(), Vec3::ZERO),
        Err(BackendError::EmptyMesh)
    );
    let b = p.create_static_body(&mesh, Vec3::UP).unwrap();
    assert!(!p.is_active(b));
    p.add_object(b).unwrap();
    assert!(p.is_active(b));
    assert!(p.has_body_at(Vec3::UP));
    p.remove_body(b);
    assert_eq!(p.body_count(), 0);
    assert_eq!(p.active_count(), 0);
    assert!(p.add_object(b).is_err());
}

#[test]
fn physics_failure_injection_is_counted_down() {
    let mut p = HeadlessPhysics::new();
    let mesh = CollisionMesh {
        vertices: vec![[0.0; 3]; 3],
        indices: vec![[0, 1, 2]],
    };
    p.fail_next_creates(1);
    assert!(p.create_static_body(&mesh, Vec3::ZERO).is_err());
    assert!(p.create_static_body(&mesh, Vec3::ZERO).is_ok());
    let bad = CollisionMesh {
        vertices: vec![[0.0; 3]; 2],
        indices: vec![[0, 1, 2]],
    };
    assert_eq!(p.create_static_body(&bad, Vec3::ZERO), Err(BackendError::InvalidMesh));
}
