use strata_geom::{Aabb, Vec3};

/// Floats per emitted vertex: position, normal, material.
pub const FLOATS_PER_VERTEX: usize = 7;
pub const FLOATS_PER_TRIANGLE: usize = FLOATS_PER_VERTEX * 3;

/// Flat, non-indexed triangle list. Each vertex is
/// `[x, y, z, nx, ny, nz, material]` in chunk-local space.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct TriangleBuffer {
    floats: Vec<f32>,
}

impl TriangleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the buffer but retains capacity for reuse.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.floats.clear();
    }

    #[inline]
    pub fn reserve_triangles(&mut self, n: usize) {
        self.floats.reserve(n * FLOATS_PER_TRIANGLE);
    }

    /// Appends a triangle with a shared face normal `(b - a) x (c - a)`.
    /// Degenerate triangles get a zero normal.
    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, material: f32) {
        let n = (b - a).cross(c - a).normalized();
        for p in [a, b, c] {
            self.floats
                .extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, material]);
        }
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.floats.len() / FLOATS_PER_TRIANGLE
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.floats.len() / FLOATS_PER_VERTEX
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.floats.is_empty()
    }

    #[inline]
    pub fn floats(&self) -> &[f32] {
        &self.floats
    }

    pub fn into_floats(self) -> Vec<f32> {
        self.floats
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.floats
            .chunks_exact(FLOATS_PER_VERTEX)
            .map(|v| Vec3::new(v[0], v[1], v[2]))
    }

    pub fn normals(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.floats
            .chunks_exact(FLOATS_PER_VERTEX)
            .map(|v| Vec3::new(v[3], v[4], v[5]))
    }

    pub fn materials(&self) -> impl Iterator<Item = f32> + '_ {
        self.floats.chunks_exact(FLOATS_PER_VERTEX).map(|v| v[6])
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.floats.chunks_exact(FLOATS_PER_TRIANGLE).map(|t| {
            [
                Vec3::new(t[0], t[1], t[2]),
                Vec3::new(t[7], t[8], t[9]),
                Vec3::new(t[14], t[15], t[16]),
            ]
        })
    }

    /// Local-space bounds of all vertices, or `None` when empty.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut it = self.positions();
        let first = it.next()?;
        let (mut min, mut max) = (first, first);
        for p in it {
            min = Vec3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Vec3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }
        Some(Aabb::new(min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_triangle_writes_three_records_with_face_normal() {
        let mut tb = TriangleBuffer::new();
        tb.push_triangle(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
            2.0,
        );
        assert_eq!(tb.floats().len(), FLOATS_PER_TRIANGLE);
        assert_eq!(tb.triangle_count(), 1);
        assert_eq!(tb.vertex_count(), 3);
        for n in tb.normals() {
            assert_eq!(n, Vec3::UP);
        }
        assert!(tb.materials().all(|m| m == 2.0));
    }

    #[test]
    fn degenerate_triangle_has_zero_normal() {
        let mut tb = TriangleBuffer::new();
        let p = Vec3::new(1.0, 1.0, 1.0);
        tb.push_triangle(p, p, Vec3::new(2.0, 1.0, 1.0), 0.0);
        assert!(tb.normals().all(|n| n == Vec3::ZERO));
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let mut tb = TriangleBuffer::new();
        assert!(tb.bounds().is_none());
        tb.push_triangle(
            Vec3::new(-1.0, 2.0, 0.0),
            Vec3::new(3.0, 0.5, 1.0),
            Vec3::new(0.0, 0.0, 4.0),
            0.0,
        );
        let b = tb.bounds().unwrap();
        assert_eq!(b.min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(b.max, Vec3::new(3.0, 2.0, 4.0));
    }
}
