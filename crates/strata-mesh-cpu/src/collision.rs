use crate::mesh_build::{FLOATS_PER_VERTEX, TriangleBuffer};

/// Indexed triangle soup for static collision shapes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionMesh {
    pub vertices: Vec<[f32; 3]>,
    pub indices: Vec<[u32; 3]>,
}

impl CollisionMesh {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Strips normals and materials; every triangle keeps its own three vertices.
pub fn collision_triangles(buffer: &TriangleBuffer) -> CollisionMesh {
    let vertices: Vec<[f32; 3]> = buffer
        .floats()
        .chunks_exact(FLOATS_PER_VERTEX)
        .map(|v| [v[0], v[1], v[2]])
        .collect();
    let indices = (0..buffer.triangle_count() as u32)
        .map(|t| [t * 3, t * 3 + 1, t * 3 + 2])
        .collect();
    CollisionMesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_geom::Vec3;

    #[test]
    fn collision_mesh_mirrors_triangles() {
        let mut tb = TriangleBuffer::new();
        tb.push_triangle(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0), 0.0);
        tb.push_triangle(Vec3::UP, Vec3::new(0.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 0.0), 2.0);
        let cm = collision_triangles(&tb);
        assert_eq!(cm.triangle_count(), 2);
        assert_eq!(cm.vertices.len(), 6);
        assert_eq!(cm.indices[1], [3, 4, 5]);
        assert_eq!(cm.vertices[3], [0.0, 1.0, 0.0]);
        assert!(collision_triangles(&TriangleBuffer::new()).is_empty());
    }
}
