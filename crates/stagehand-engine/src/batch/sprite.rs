use std::sync::Arc;

use crate::content::Texture2D;
use crate::coords::{Rect, Vec2};
use crate::paint::Color;

/// One textured quad submitted to a [`SpriteBatch`](super::SpriteBatch).
///
/// `position` is where `origin` (in unscaled source pixels) lands on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub texture: Arc<Texture2D>,
    /// Region of the texture to draw; `None` = the whole texture.
    pub source: Option<Rect>,
    pub position: Vec2,
    pub origin: Vec2,
    pub scale: Vec2,
    /// Radians, clockwise around `origin`.
    pub rotation: f32,
    pub tint: Color,
    pub depth: i32,
}

impl Sprite {
    pub fn new(texture: &Arc<Texture2D>, position: Vec2) -> Self {
        Self {
            texture: Arc::clone(texture),
            source: None,
            position,
            origin: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            tint: Color::WHITE,
            depth: 0,
        }
    }

    pub fn source(mut self, source: Rect) -> Self {
        self.source = Some(source);
        self
    }

    pub fn origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    pub fn depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    /// Source region size in texture pixels.
    pub fn source_size(&self) -> Vec2 {
        self.source.map(|r| r.size).unwrap_or_else(|| self.texture.size())
    }

    /// Axis-aligned screen rectangle covered by the quad, ignoring rotation.
    pub fn screen_rect(&self) -> Rect {
        let top_left = self.position - self.origin.scale(self.scale);
        Rect::from_origin_size(top_left, self.source_size().scale(self.scale))
    }
}
