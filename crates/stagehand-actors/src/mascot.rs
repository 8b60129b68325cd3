//! Keyboard-driven mascot that charges a fireball while the left mouse
//! button is held.

use stagehand_engine::anim::{Animator, SpriteSheet};
use stagehand_engine::batch::{SpriteBatch, Surface};
use stagehand_engine::content::{Texture2D, TextureConfig};
use stagehand_engine::core::{ActorControl, ActorParams, FrameActor, InitCtx, UpdateCtx};
use stagehand_engine::coords::Vec2;
use stagehand_engine::error::ActorError;
use stagehand_engine::input::{Key, MouseButton};
use stagehand_engine::paint::Color;
use stagehand_engine::time::GameTime;

use crate::fireball;

pub const NAME: &str = "mascot";

const UP: [Key; 2] = [Key::W, Key::ArrowUp];
const DOWN: [Key; 2] = [Key::S, Key::ArrowDown];
const LEFT: [Key; 2] = [Key::A, Key::ArrowLeft];
const RIGHT: [Key; 2] = [Key::D, Key::ArrowRight];
const MOVE_KEYS: [Key; 8] = [
    Key::W, Key::ArrowUp, Key::S, Key::ArrowDown,
    Key::A, Key::ArrowLeft, Key::D, Key::ArrowRight,
];

const BACKGROUND: Color = Color::rgb(0.25, 0.30, 0.35);

pub struct Mascot {
    texture_name: String,
    fireball_name: String,
    tiles: u32,
    walk_ms: f32,
    speed: f32,
    growth: f32,
    initial_size: f32,

    start: Vec2,
    position: Vec2,
    walking: bool,
    fireball_size: f32,

    walk: Option<Animator>,
    fireball: Option<Animator>,
}

impl Mascot {
    pub fn from_params(params: &ActorParams) -> Result<Self, ActorError> {
        let tiles = params.u32_or("tiles", 4)?;
        if tiles == 0 {
            return Err(ActorError::invalid("'tiles' must be at least 1"));
        }
        let initial_size = params.positive_f32_or("fireball_size", 1.0)?;

        Ok(Self {
            texture_name: params.str_or("texture", "mascot.png")?.to_string(),
            fireball_name: params.str_or("fireball", "ft/fireball.png")?.to_string(),
            tiles,
            walk_ms: params.positive_f32_or("walk_ms", 500.0)?,
            speed: params.positive_f32_or("speed", 200.0)?,
            growth: params.positive_f32_or("growth", 1.0)?,
            initial_size,
            start: Vec2::ZERO,
            position: Vec2::ZERO,
            walking: false,
            fireball_size: initial_size,
            walk: None,
            fireball: None,
        })
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_walking(&self) -> bool {
        self.walking
    }

    pub fn fireball_size(&self) -> f32 {
        self.fireball_size
    }

    /// True once the fireball has grown past its starting size.
    pub fn is_charged(&self) -> bool {
        self.fireball_size > self.initial_size
    }

    pub fn walk_frame(&self) -> Option<u32> {
        self.walk.as_ref().map(Animator::frame)
    }

    /// Position delta for the held direction keys. Axes add up independently,
    /// so diagonals are faster than straight lines.
    fn movement(ctx: &UpdateCtx<'_>, distance: f32) -> Vec2 {
        let mut delta = Vec2::ZERO;
        if ctx.any_key_down(&UP) {
            delta.y -= distance;
        }
        if ctx.any_key_down(&DOWN) {
            delta.y += distance;
        }
        if ctx.any_key_down(&LEFT) {
            delta.x -= distance;
        }
        if ctx.any_key_down(&RIGHT) {
            delta.x += distance;
        }
        delta
    }
}

impl FrameActor for Mascot {
    fn name(&self) -> &str {
        NAME
    }

    fn initialize(&mut self, ctx: &mut InitCtx<'_>) -> Result<(), ActorError> {
        let sheet = ctx.content.load_with::<Texture2D>(&self.texture_name, &TextureConfig::NEAREST)?;
        let flame = ctx.content.load_with::<Texture2D>(&self.fireball_name, &TextureConfig::NEAREST)?;

        self.start = ctx.bounds().center();
        self.position = self.start;

        let mut walk = Animator::new(SpriteSheet::new(sheet, self.tiles, 1), self.tiles, 0);
        walk.set_duration_ms(self.walk_ms);
        walk.position = self.position;

        let mut fireball = Animator::new(SpriteSheet::new(flame, fireball::TILES, 1), fireball::TILES, 0);
        fireball.set_duration_ms(fireball::CYCLE_MS);
        fireball.depth = 1;

        self.walk = Some(walk);
        self.fireball = Some(fireball);
        self.fireball_size = self.initial_size;
        self.walking = false;
        Ok(())
    }

    fn update(&mut self, ctx: &UpdateCtx<'_>) -> ActorControl {
        if ctx.key_typed(Key::Escape) {
            return ActorControl::Exit;
        }

        let dt = ctx.dt();
        self.position += Self::movement(ctx, self.speed * dt);
        self.walking = ctx.any_key_down(&MOVE_KEYS);

        if ctx.button_down(MouseButton::Left) && ctx.pointer_inside() {
            self.fireball_size += self.growth * dt;
        }

        if let Some(walk) = self.walk.as_mut() {
            if self.walking {
                walk.update(dt);
            }
            walk.position = self.position;
        }

        if let Some(fireball) = self.fireball.as_mut() {
            fireball.update(dt);
            fireball.scale = Vec2::splat(self.fireball_size);
            let above = fireball.sheet().tile_height() as f32 * self.fireball_size;
            fireball.position = self.position - Vec2::new(0.0, above);
        }

        ActorControl::Continue
    }

    fn draw(&self, surface: &mut Surface, _time: &GameTime) {
        surface.clear(BACKGROUND);
    }

    fn draw2d(&self, batch: &mut SpriteBatch, _time: &GameTime) {
        if let Some(walk) = &self.walk {
            walk.draw(batch);
        }
        if self.is_charged() {
            if let Some(fireball) = &self.fireball {
                fireball.draw(batch);
            }
        }
    }

    fn reset(&mut self) {
        self.position = self.start;
        self.walking = false;
        self.fireball_size = self.initial_size;
        for animator in [self.walk.as_mut(), self.fireball.as_mut()].into_iter().flatten() {
            animator.rewind();
        }
        if let Some(walk) = self.walk.as_mut() {
            walk.position = self.start;
        }
    }
}
