use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::voxel::WorldGenMode;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default = "default_mode")]
    pub mode: Mode,
    #[serde(default)]
    pub flat: Flat,
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub caves: Caves,
    #[serde(default)]
    pub surface: Surface,
}

impl WorldGenConfig {
    pub fn world_mode(&self) -> WorldGenMode {
        match self.mode {
            Mode::Normal => WorldGenMode::Normal,
            Mode::Flat => WorldGenMode::Flat {
                surface_y: self.flat.surface_y,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Normal,
    Flat,
}

fn default_mode() -> Mode {
    Mode::Normal
}

#[derive(Clone, Debug, Deserialize)]
pub struct Flat {
    #[serde(default = "default_flat_surface_y")]
    pub surface_y: f32,
}
fn default_flat_surface_y() -> f32 {
    5.0
}
impl Default for Flat {
    fn default() -> Self {
        Self {
            surface_y: default_flat_surface_y(),
        }
    }
}

/// Fractal sum settings. `frequency` is the base frequency of the first octave.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Fractal {
    #[serde(default = "d_oct")]
    pub octaves: i32,
    #[serde(default = "d_pers")]
    pub persistence: f32,
    #[serde(default = "d_lac")]
    pub lacunarity: f32,
    #[serde(default = "d_freq")]
    pub frequency: f32,
}
fn d_oct() -> i32 {
    4
}
fn d_pers() -> f32 {
    0.5
}
fn d_lac() -> f32 {
    2.0
}
fn d_freq() -> f32 {
    0.01
}
impl Default for Fractal {
    fn default() -> Self {
        Self {
            octaves: d_oct(),
            persistence: d_pers(),
            lacunarity: d_lac(),
            frequency: d_freq(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    #[serde(default = "default_height_fractal")]
    pub fractal: Fractal,
    /// Peak terrain height in world units.
    #[serde(default = "default_height_scale")]
    pub scale: f32,
    /// Exponent applied to the normalized noise value before scaling.
    #[serde(default = "default_height_exponent")]
    pub exponent: f32,
    /// Width of the density ramp across the surface.
    #[serde(default = "default_transition")]
    pub transition: f32,
}
fn default_height_fractal() -> Fractal {
    Fractal {
        octaves: 6,
        frequency: 0.002,
        ..Fractal::default()
    }
}
fn default_height_scale() -> f32 {
    250.0
}
fn default_height_exponent() -> f32 {
    3.0
}
fn default_transition() -> f32 {
    1.0
}
impl Default for Height {
    fn default() -> Self {
        Self {
            fractal: default_height_fractal(),
            scale: default_height_scale(),
            exponent: default_height_exponent(),
            transition: default_transition(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Caves {
    #[serde(default = "default_caves_enable")]
    pub enable: bool,
    #[serde(default = "default_cave_fractal")]
    pub fractal: Fractal,
    /// Noise values above this carve empty space.
    #[serde(default = "default_cave_threshold")]
    pub threshold: f32,
    #[serde(default = "default_transition")]
    pub transition: f32,
}
fn default_caves_enable() -> bool {
    true
}
fn default_cave_fractal() -> Fractal {
    Fractal {
        octaves: 5,
        frequency: 0.005,
        ..Fractal::default()
    }
}
fn default_cave_threshold() -> f32 {
    0.95
}
impl Default for Caves {
    fn default() -> Self {
        Self {
            enable: default_caves_enable(),
            fractal: default_cave_fractal(),
            threshold: default_cave_threshold(),
            transition: default_transition(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Surface {
    /// Samples deeper than this below the surface height are rock.
    #[serde(default = "default_surface_margin")]
    pub margin: f32,
}
fn default_surface_margin() -> f32 {
    2.0
}
impl Default for Surface {
    fn default() -> Self {
        Self {
            margin: default_surface_margin(),
        }
    }
}

/// Flattened generation parameters consumed by the generator.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldGenParams {
    pub height_fractal: Fractal,
    pub height_scale: f32,
    pub height_exponent: f32,
    pub height_transition: f32,
    pub caves_enable: bool,
    pub cave_fractal: Fractal,
    pub cave_threshold: f32,
    pub cave_transition: f32,
    pub surface_margin: f32,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        Self {
            height_fractal: cfg.height.fractal,
            height_scale: cfg.height.scale,
            height_exponent: cfg.height.exponent,
            height_transition: cfg.height.transition.max(f32::EPSILON),
            caves_enable: cfg.caves.enable,
            cave_fractal: cfg.caves.fractal,
            cave_threshold: cfg.caves.threshold,
            cave_transition: cfg.caves.transition.max(f32::EPSILON),
            surface_margin: cfg.surface.margin,
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<WorldGenConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: WorldGenConfig = toml::from_str(&s)?;
    Ok(cfg)
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenParams, Box<dyn Error>> {
    let cfg = load_config_from_path(path)?;
    Ok(WorldGenParams::from_config(&cfg))
}
