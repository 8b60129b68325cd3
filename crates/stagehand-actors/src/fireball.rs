//! Animated fireball that travels up the screen from the bottom edge and
//! wraps back around once it leaves the top.
//!
//! Params: `texture` (sheet path), `fall_speed` in px/s and an optional `x`
//! column. Without `x` the ball starts horizontally centered.

use stagehand_engine::anim::{Animator, SpriteSheet};
use stagehand_engine::batch::{SpriteBatch, Surface};
use stagehand_engine::content::{Texture2D, TextureConfig};
use stagehand_engine::core::{ActorControl, ActorParams, FrameActor, InitCtx, UpdateCtx};
use stagehand_engine::coords::Vec2;
use stagehand_engine::error::ActorError;
use stagehand_engine::paint::Color;
use stagehand_engine::time::GameTime;

pub const NAME: &str = "fireball";

pub const TILES: u32 = 8;
pub const CYCLE_MS: f32 = 750.0;

pub struct Fireball {
    texture_name: String,
    fall_speed: f32,
    x: Option<f32>,

    animator: Option<Animator>,
    start: Vec2,
}

impl Fireball {
    pub fn from_params(params: &ActorParams) -> Result<Self, ActorError> {
        let x = if params.contains("x") { Some(params.f32_or("x", 0.0)?) } else { None };
        Ok(Self {
            texture_name: params.str_or("texture", "ft/fireball.png")?.to_string(),
            fall_speed: params.positive_f32_or("fall_speed", 750.0)?,
            x,
            animator: None,
            start: Vec2::ZERO,
        })
    }

    pub fn animator(&self) -> Option<&Animator> {
        self.animator.as_ref()
    }
}

impl FrameActor for Fireball {
    fn name(&self) -> &str {
        NAME
    }

    fn initialize(&mut self, ctx: &mut InitCtx<'_>) -> Result<(), ActorError> {
        let texture = ctx.content.load_with::<Texture2D>(&self.texture_name, &TextureConfig::NEAREST)?;
        let bounds = ctx.bounds();

        let mut animator = Animator::new(SpriteSheet::new(texture, TILES, 1), TILES, 0);
        animator.set_duration_ms(CYCLE_MS);
        animator.scale = Vec2::splat(2.0);
        self.start = Vec2::new(self.x.unwrap_or(bounds.width() / 2.0), bounds.height());
        animator.position = self.start;

        self.animator = Some(animator);
        Ok(())
    }

    fn update(&mut self, ctx: &UpdateCtx<'_>) -> ActorControl {
        let Some(animator) = self.animator.as_mut() else {
            return ActorControl::Continue;
        };
        let dt = ctx.dt();
        animator.update(dt);
        animator.position.y -= self.fall_speed * dt;

        let tile_h = animator.sheet().tile_height() as f32;
        if animator.position.y < -tile_h {
            animator.position.y = ctx.bounds().height();
        }
        ActorControl::Continue
    }

    fn draw(&self, surface: &mut Surface, _time: &GameTime) {
        surface.clear(Color::BLACK);
    }

    fn draw2d(&self, batch: &mut SpriteBatch, _time: &GameTime) {
        if let Some(animator) = &self.animator {
            animator.draw(batch);
        }
    }

    fn reset(&mut self) {
        if let Some(animator) = self.animator.as_mut() {
            animator.rewind();
            animator.position = self.start;
        }
    }
}
