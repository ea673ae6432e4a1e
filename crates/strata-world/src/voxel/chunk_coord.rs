use serde::{Deserialize, Serialize};
use strata_geom::Vec3;

/// Integer address of a cubic chunk region. Compared and hashed by exact value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
            cz: self.cz + dz,
        }
    }

    #[inline]
    pub fn distance_sq(self, other: ChunkCoord) -> i64 {
        let dx = i64::from(self.cx - other.cx);
        let dy = i64::from(self.cy - other.cy);
        let dz = i64::from(self.cz - other.cz);
        dx * dx + dy * dy + dz * dz
    }

    /// Chunk containing the world-space point, using floor division on every axis.
    #[inline]
    pub fn from_world(pos: Vec3, chunk_size: usize) -> Self {
        let s = chunk_size as f32;
        let c = (pos / s).floor();
        Self::new(c.x as i32, c.y as i32, c.z as i32)
    }

    /// Lattice-space origin of the chunk (`coord * chunk_size`).
    #[inline]
    pub fn base(self, chunk_size: usize) -> (i32, i32, i32) {
        let s = chunk_size as i32;
        (self.cx * s, self.cy * s, self.cz * s)
    }

    #[inline]
    pub fn world_origin(self, chunk_size: usize) -> Vec3 {
        let (x, y, z) = self.base(chunk_size);
        Vec3::new(x as f32, y as f32, z as f32)
    }
}

impl From<(i32, i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<ChunkCoord> for (i32, i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cy, value.cz)
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.cx, self.cy, self.cz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_world_floors_negative_positions() {
        assert_eq!(
            ChunkCoord::from_world(Vec3::new(-0.01, 0.0, 31.99), 32),
            ChunkCoord::new(-1, 0, 0)
        );
        assert_eq!(
            ChunkCoord::from_world(Vec3::new(-32.0, 64.0, -33.0), 32),
            ChunkCoord::new(-1, 2, -2)
        );
    }

    #[test]
    fn world_origin_scales_by_chunk_size() {
        let c = ChunkCoord::new(-2, 0, 3);
        assert_eq!(c.base(16), (-32, 0, 48));
        assert_eq!(c.world_origin(16), Vec3::new(-32.0, 0.0, 48.0));
    }

    #[test]
    fn distinct_coords_never_collide_as_keys() {
        // Packed-bit hashing would fold these together.
        let mut set = std::collections::HashSet::new();
        set.insert(ChunkCoord::new(1, 2, 0));
        set.insert(ChunkCoord::new(0, 0, 1));
        set.insert(ChunkCoord::new(2, 0, 0));
        assert_eq!(set.len(), 3);
    }
}
