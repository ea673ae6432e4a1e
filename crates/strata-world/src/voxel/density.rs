use crate::ISOLEVEL;

/// Surface material identifier carried alongside each density sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u16);

impl MaterialId {
    pub const ROCK: MaterialId = MaterialId(0);
    pub const GRASS: MaterialId = MaterialId(2);

    #[inline]
    pub fn as_f32(self) -> f32 {
        f32::from(self.0)
    }
}

/// Lattice of `(size + 1)^3` density samples covering one chunk.
///
/// Samples on the `size` boundary coincide with the `0` samples of the
/// neighbouring chunk, so adjacent meshes meet without gaps. Storage order is
/// `(y * dim + z) * dim + x` with `dim = size + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityGrid {
    size: usize,
    densities: Vec<f32>,
    materials: Vec<MaterialId>,
}

impl DensityGrid {
    /// All-empty grid (density 0, rock).
    pub fn new(size: usize) -> Self {
        Self::filled(size, 0.0, MaterialId::ROCK)
    }

    pub fn filled(size: usize, density: f32, material: MaterialId) -> Self {
        let dim = size + 1;
        let n = dim * dim * dim;
        Self {
            size,
            densities: vec![density; n],
            materials: vec![material; n],
        }
    }

    /// Builds a grid by sampling `f(x, y, z)` at every lattice point.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize, usize) -> (f32, MaterialId)) -> Self {
        let mut grid = Self::new(size);
        let dim = size + 1;
        for y in 0..dim {
            for z in 0..dim {
                for x in 0..dim {
                    let (d, m) = f(x, y, z);
                    grid.set(x, y, z, d, m);
                }
            }
        }
        grid
    }

    /// Cells per axis.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn samples_per_axis(&self) -> usize {
        self.size + 1
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.densities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.densities.is_empty()
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        let dim = self.size + 1;
        assert!(
            x < dim && y < dim && z < dim,
            "lattice index ({x}, {y}, {z}) out of range for {dim} samples per axis"
        );
        (y * dim + z) * dim + x
    }

    #[inline]
    pub fn density(&self, x: usize, y: usize, z: usize) -> f32 {
        self.densities[self.idx(x, y, z)]
    }

    #[inline]
    pub fn material(&self, x: usize, y: usize, z: usize) -> MaterialId {
        self.materials[self.idx(x, y, z)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, density: f32, material: MaterialId) {
        let i = self.idx(x, y, z);
        self.densities[i] = density;
        self.materials[i] = material;
    }

    pub fn densities(&self) -> &[f32] {
        &self.densities
    }

    pub fn materials(&self) -> &[MaterialId] {
        &self.materials
    }

    /// True when every sample falls on the same side of the isolevel.
    pub fn is_uniform(&self) -> bool {
        let mut below = false;
        let mut above = false;
        for &d in &self.densities {
            if d < ISOLEVEL {
                below = true;
            } else {
                above = true;
            }
            if below && above {
                return false;
            }
        }
        true
    }

    pub fn solid_count(&self) -> usize {
        self.densities.iter().filter(|&&d| d >= ISOLEVEL).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_holds_one_extra_sample_per_axis() {
        let g = DensityGrid::new(4);
        assert_eq!(g.samples_per_axis(), 5);
        assert_eq!(g.len(), 125);
        assert_eq!(g.idx(4, 4, 4), 124);
        assert_eq!(g.idx(1, 0, 0), 1);
        assert_eq!(g.idx(0, 0, 1), 5);
        assert_eq!(g.idx(0, 1, 0), 25);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_x_does_not_alias_next_row() {
        let mut g = DensityGrid::new(2);
        g.set(0, 0, 1, 0.9, MaterialId::ROCK);
        let _ = g.density(3, 0, 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_y_panics() {
        let g = DensityGrid::new(2);
        let _ = g.material(0, 3, 0);
    }

    #[test]
    fn set_updates_density_and_material() {
        let mut g = DensityGrid::new(2);
        g.set(1, 2, 0, 0.75, MaterialId::GRASS);
        assert!((g.density(1, 2, 0) - 0.75).abs() < 1e-6);
        assert_eq!(g.material(1, 2, 0), MaterialId::GRASS);
        assert_eq!(g.material(0, 0, 0), MaterialId::ROCK);
    }

    #[test]
    fn uniformity_tracks_isolevel_crossings() {
        assert!(DensityGrid::new(3).is_uniform());
        assert!(DensityGrid::filled(3, 1.0, MaterialId::ROCK).is_uniform());
        let mut g = DensityGrid::new(3);
        g.set(2, 2, 2, ISOLEVEL, MaterialId::ROCK);
        assert!(!g.is_uniform());
        assert_eq!(g.solid_count(), 1);
    }
}
