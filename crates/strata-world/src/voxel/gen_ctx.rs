use std::sync::Arc;

use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::worldgen::{Fractal, WorldGenParams};

/// Noise instances and parameters used to fill one or more chunks.
pub struct GenCtx {
    pub terrain: FastNoiseLite,
    pub caves: FastNoiseLite,
    pub params: Arc<WorldGenParams>,
}

impl GenCtx {
    pub fn new(seed: i32, params: Arc<WorldGenParams>) -> Self {
        Self {
            terrain: base_noise(seed),
            caves: base_noise(seed ^ 41_337),
            params,
        }
    }

    /// Terrain surface height at a world-space column.
    pub fn surface_height(&self, wx: f32, wz: f32) -> f32 {
        let p = &self.params;
        let n = fractal2(&self.terrain, wx, wz, &p.height_fractal);
        super::generation::surface_height(n, p.height_exponent, p.height_scale)
    }

    pub fn cave_noise(&self, wx: f32, wy: f32, wz: f32) -> f32 {
        fractal3(&self.caves, wx, wy, wz, &self.params.cave_fractal)
    }
}

fn base_noise(seed: i32) -> FastNoiseLite {
    let mut n = FastNoiseLite::with_seed(seed);
    n.set_noise_type(Some(NoiseType::OpenSimplex2));
    // Octave frequencies are applied to the coordinates in the fractal sums.
    n.set_frequency(Some(1.0));
    n
}

pub(crate) fn fractal2(noise: &FastNoiseLite, x: f32, z: f32, fractal: &Fractal) -> f32 {
    let mut amp = 1.0_f32;
    let mut freq = fractal.frequency;
    let mut sum = 0.0_f32;
    let mut max_amp = 0.0_f32;
    for _ in 0..fractal.octaves.max(1) {
        sum += noise.get_noise_2d(x * freq, z * freq) * amp;
        max_amp += amp;
        amp *= fractal.persistence;
        freq *= fractal.lacunarity;
    }
    if max_amp > 0.0 { sum / max_amp } else { sum }
}

pub(crate) fn fractal3(noise: &FastNoiseLite, x: f32, y: f32, z: f32, fractal: &Fractal) -> f32 {
    let mut amp = 1.0_f32;
    let mut freq = fractal.frequency;
    let mut sum = 0.0_f32;
    let mut max_amp = 0.0_f32;
    for _ in 0..fractal.octaves.max(1) {
        sum += noise.get_noise_3d(x * freq, y * freq, z * freq) * amp;
        max_amp += amp;
        amp *= fractal.persistence;
        freq *= fractal.lacunarity;
    }
    if max_amp > 0.0 { sum / max_amp } else { sum }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractal_sums_stay_normalized() {
        let ctx = GenCtx::new(7, Arc::new(WorldGenParams::default()));
        for i in 0..64 {
            let x = i as f32 * 37.5 - 900.0;
            let n2 = fractal2(&ctx.terrain, x, -x * 0.5, &ctx.params.height_fractal);
            let n3 = ctx.cave_noise(x, x * 0.25, 13.0);
            assert!(n2.abs() <= 1.1, "{n2}");
            assert!(n3.abs() <= 1.1, "{n3}");
        }
    }

    #[test]
    fn same_seed_same_heights() {
        let params = Arc::new(WorldGenParams::default());
        let a = GenCtx::new(99, params.clone());
        let b = GenCtx::new(99, params);
        assert_eq!(a.surface_height(120.0, -48.0), b.surface_height(120.0, -48.0));
    }
}
