/// Shader program a material binds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    FlatColor,
    TerrainGBuffer,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureSlot {
    pub slot: u32,
    pub path: String,
}

/// Everything a renderer needs to activate a material before drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialBinding {
    pub shader: ShaderKind,
    pub color: Option<[f32; 4]>,
    pub textures: Vec<TextureSlot>,
}

/// Surface appearance shared by all terrain chunks.
#[derive(Clone, Debug, PartialEq)]
pub enum ChunkMaterial {
    Flat { color: [f32; 4] },
    Terrain { albedo: String, normal_map: String },
}

impl Default for ChunkMaterial {
    fn default() -> Self {
        ChunkMaterial::Terrain {
            albedo: "assets/terrain.png".to_string(),
            normal_map: "assets/terrain-normal.png".to_string(),
        }
    }
}

impl ChunkMaterial {
    pub fn bind(&self) -> MaterialBinding {
        match self {
            ChunkMaterial::Flat { color } => MaterialBinding {
                shader: ShaderKind::FlatColor,
                color: Some(*color),
                textures: Vec::new(),
            },
            ChunkMaterial::Terrain { albedo, normal_map } => MaterialBinding {
                shader: ShaderKind::TerrainGBuffer,
                color: None,
                textures: vec![
                    TextureSlot {
                        slot: 0,
                        path: albedo.clone(),
                    },
                    TextureSlot {
                        slot: 1,
                        path: normal_map.clone(),
                    },
                ],
            },
        }
    }
}
