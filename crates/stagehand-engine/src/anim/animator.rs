use std::time::Duration;

use crate::batch::{Sprite, SpriteBatch};
use crate::coords::{Rect, Vec2};
use crate::paint::Color;

use super::SpriteSheet;

/// Plays a run of sprite sheet tiles on a loop.
///
/// The clip lasts `duration`; each of its `count` tiles is shown for
/// `duration / count`, scaled by `speed`. Actors drive it with `update` and
/// set `position`/`scale`/`speed`/`origin` directly.
#[derive(Debug, Clone)]
pub struct Animator {
    pub speed: f32,
    pub position: Vec2,
    pub scale: Vec2,
    /// Radians.
    pub rotation: f32,
    pub tint: Color,
    /// Pivot in unscaled tile pixels. `None` pivots on the tile center.
    pub origin: Option<Vec2>,
    pub depth: i32,

    sheet: SpriteSheet,
    start_tile: u32,
    count: u32,
    index: u32,
    duration: f32,
    delta: f32,
    target: f32,
}

impl Animator {
    /// `count` is clamped to at least one tile.
    pub fn new(sheet: SpriteSheet, count: u32, start_tile: u32) -> Self {
        let mut animator = Self {
            speed: 1.0,
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            tint: Color::WHITE,
            origin: None,
            depth: 0,
            sheet,
            start_tile,
            count: count.max(1),
            index: 0,
            duration: 1.0,
            delta: 0.0,
            target: 0.0,
        };
        animator.update_target();
        animator
    }

    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f32(self.duration.max(0.0))
    }

    pub fn set_duration_secs(&mut self, secs: f32) {
        self.duration = secs;
        self.update_target();
    }

    pub fn set_duration_ms(&mut self, ms: f32) {
        self.set_duration_secs(ms / 1000.0);
    }

    /// Index of the current tile within the clip, `0..count`.
    pub fn frame(&self) -> u32 {
        self.index
    }

    /// Sheet index of the tile currently shown.
    pub fn current_tile(&self) -> u32 {
        self.start_tile + self.index
    }

    pub fn rewind(&mut self) {
        self.index = 0;
        self.delta = 0.0;
    }

    /// Advances playback by `elapsed` seconds.
    pub fn update(&mut self, elapsed: f32) {
        if self.target <= 0.0 {
            return;
        }

        self.delta += self.speed * elapsed;
        if !self.delta.is_finite() || self.delta < 0.0 {
            self.delta = 0.0;
            return;
        }
        if self.delta < self.target {
            return;
        }

        // A long frame (or a tiny duration) can cross many tile boundaries at once.
        let steps = (self.delta / self.target).floor();
        self.delta = (self.delta - steps * self.target).clamp(0.0, self.target);
        let advanced = (u64::from(self.index) + steps as u64 % u64::from(self.count)) % u64::from(self.count);
        self.index = advanced as u32;
    }

    /// Screen rectangle of one unscaled tile centered on `position`.
    pub fn bounds(&self) -> Rect {
        Rect::centered_at(self.position, self.sheet.tile_size())
    }

    /// Records the current tile into `batch`.
    pub fn draw(&self, batch: &mut SpriteBatch) {
        let source = self.sheet.tile(self.current_tile());
        let origin = self.origin.unwrap_or(source.size / 2.0);

        batch.draw_sprite(
            Sprite::new(self.sheet.texture(), self.position)
                .source(source)
                .origin(origin)
                .scale(self.scale)
                .rotation(self.rotation)
                .tint(self.tint)
                .depth(self.depth),
        );
    }

    fn update_target(&mut self) {
        self.target = self.duration / self.count as f32;
    }
}
