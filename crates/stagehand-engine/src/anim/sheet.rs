use std::sync::Arc;

use crate::content::Texture2D;
use crate::coords::{Rect, Vec2};

/// A texture split into a uniform grid of tiles.
///
/// Tiles are numbered row-major starting at the top-left.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    texture: Arc<Texture2D>,
    tiles_x: u32,
    tiles_y: u32,
}

impl SpriteSheet {
    /// `tiles_x`/`tiles_y` are clamped to at least one tile.
    pub fn new(texture: Arc<Texture2D>, tiles_x: u32, tiles_y: u32) -> Self {
        Self {
            texture,
            tiles_x: tiles_x.max(1),
            tiles_y: tiles_y.max(1),
        }
    }

    pub fn texture(&self) -> &Arc<Texture2D> {
        &self.texture
    }

    pub fn tile_count(&self) -> u32 {
        self.tiles_x * self.tiles_y
    }

    pub fn tile_width(&self) -> u32 {
        self.texture.width() / self.tiles_x
    }

    pub fn tile_height(&self) -> u32 {
        self.texture.height() / self.tiles_y
    }

    pub fn tile_size(&self) -> Vec2 {
        Vec2::new(self.tile_width() as f32, self.tile_height() as f32)
    }

    /// Source rectangle of the tile at grid cell (`x`, `y`).
    pub fn tile_at(&self, x: u32, y: u32) -> Rect {
        let (w, h) = (self.tile_width(), self.tile_height());
        Rect::new((x * w) as f32, (y * h) as f32, w as f32, h as f32)
    }

    /// Source rectangle of tile `index`.
    pub fn tile(&self, index: u32) -> Rect {
        self.tile_at(index % self.tiles_x, index / self.tiles_x)
    }
}
