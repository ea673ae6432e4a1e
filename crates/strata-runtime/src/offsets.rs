use strata_world::ChunkCoord;

/// Integer offsets within a sphere of `radius` chunks, in lexicographic `(x, y, z)` order.
pub fn spherical_offsets(radius: i32) -> Vec<ChunkCoord> {
    if radius < 0 {
        return Vec::new();
    }
    let r_sq = i64::from(radius) * i64::from(radius);
    let mut out = Vec::new();
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            for dz in -radius..=radius {
                let o = ChunkCoord::new(dx, dy, dz);
                if o.distance_sq(ChunkCoord::default()) <= r_sq {
                    out.push(o);
                }
            }
        }
    }
    out
}
