use std::path::Path;

use image::ImageError;
use serde::{Deserialize, Serialize};

use crate::coords::Vec2;
use crate::error::ContentError;

use super::Asset;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    #[default]
    Linear,
    Nearest,
}

/// Sampling options a renderer applies when uploading the texture.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureConfig {
    #[serde(default)]
    pub interpolation: Interpolation,
    #[serde(default)]
    pub mipmap: bool,
}

impl TextureConfig {
    pub const LINEAR: TextureConfig = TextureConfig { interpolation: Interpolation::Linear, mipmap: false };
    pub const NEAREST: TextureConfig = TextureConfig { interpolation: Interpolation::Nearest, mipmap: false };
    pub const LINEAR_MIPMAP: TextureConfig = TextureConfig { interpolation: Interpolation::Linear, mipmap: true };
    pub const NEAREST_MIPMAP: TextureConfig = TextureConfig { interpolation: Interpolation::Nearest, mipmap: true };
}

/// Decoded RGBA8 image plus its sampling config.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture2D {
    name: String,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    config: TextureConfig,
}

impl Texture2D {
    /// Fully transparent texture; handy when no image file is around.
    pub fn blank(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            config: TextureConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TextureConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Row-major RGBA8 pixels.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn config(&self) -> TextureConfig {
        self.config
    }
}

impl Asset for Texture2D {
    type Config = TextureConfig;

    fn load(path: &Path, config: &TextureConfig) -> Result<Self, ContentError> {
        let image = image::open(path).map_err(|err| match err {
            ImageError::IoError(source) => ContentError::Io { path: path.to_path_buf(), source },
            other => ContentError::Decode { path: path.to_path_buf(), reason: other.to_string() },
        })?;
        let rgba = image.to_rgba8();

        Ok(Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
            config: *config,
        })
    }
}
