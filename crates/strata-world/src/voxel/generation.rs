//! Per-sample density and material rules shared by every generation mode.

use super::MaterialId;

/// Maps a fractal noise value in `[-1, 1]` to a surface height in `[0, scale]`.
#[inline]
pub fn surface_height(noise: f32, exponent: f32, scale: f32) -> f32 {
    let h = ((noise + 1.0) * 0.5).clamp(0.0, 1.0);
    h.powf(exponent) * scale
}

/// Density ramp across a surface: 1 well below it, 0 well above, 0.5 at `surface`.
#[inline]
pub fn height_density(surface: f32, world_y: f32, transition: f32) -> f32 {
    (0.5 + 0.5 * (surface - world_y) / transition).clamp(0.0, 1.0)
}

/// Multiplier that carves caves where the noise exceeds `threshold`.
#[inline]
pub fn cave_factor(noise: f32, threshold: f32, transition: f32) -> f32 {
    ((threshold - noise) / transition).clamp(0.0, 1.0)
}

#[inline]
pub fn material_at(world_y: f32, surface: f32, margin: f32) -> MaterialId {
    if world_y < surface - margin {
        MaterialId::ROCK
    } else {
        MaterialId::GRASS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_crosses_half_at_surface() {
        assert!((height_density(10.0, 10.0, 1.0) - 0.5).abs() < 1e-6);
        assert_eq!(height_density(10.0, 0.0, 1.0), 1.0);
        assert_eq!(height_density(10.0, 20.0, 1.0), 0.0);
        assert!(height_density(10.0, 9.5, 1.0) > 0.5);
        assert!(height_density(10.0, 10.5, 1.0) < 0.5);
    }

    #[test]
    fn surface_height_spans_zero_to_scale() {
        assert_eq!(surface_height(-1.0, 3.0, 250.0), 0.0);
        assert!((surface_height(1.0, 3.0, 250.0) - 250.0).abs() < 1e-3);
        assert!((surface_height(0.0, 3.0, 250.0) - 31.25).abs() < 1e-3);
    }

    #[test]
    fn caves_only_carve_above_threshold() {
        assert!((cave_factor(0.0, 0.95, 1.0) - 0.95).abs() < 1e-6);
        assert_eq!(cave_factor(0.96, 0.95, 1.0), 0.0);
        assert_eq!(cave_factor(-1.0, 0.95, 1.0), 1.0);
    }

    #[test]
    fn topsoil_is_grass_and_deeper_is_rock() {
        assert_eq!(material_at(7.0, 10.0, 2.0), MaterialId::ROCK);
        assert_eq!(material_at(8.5, 10.0, 2.0), MaterialId::GRASS);
        assert_eq!(material_at(30.0, 10.0, 2.0), MaterialId::GRASS);
    }
}
