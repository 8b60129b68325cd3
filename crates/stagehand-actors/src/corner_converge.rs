//! Four copies of a texture slide in from the screen edges, meet in the
//! middle, then slide back out: horizontally first, then vertically.

use std::sync::Arc;

use stagehand_engine::batch::{SpriteBatch, Surface};
use stagehand_engine::content::Texture2D;
use stagehand_engine::core::{ActorControl, ActorParams, FrameActor, InitCtx, UpdateCtx};
use stagehand_engine::coords::Vec2;
use stagehand_engine::error::ActorError;
use stagehand_engine::paint::Color;
use stagehand_engine::time::GameTime;

use crate::stepper::step_toward;

pub const NAME: &str = "corner_converge";

/// Vertical fields move at this fraction of `speed`.
pub const VERTICAL_RATIO: f32 = 0.6;

const BACKGROUND: Color = Color::rgb(0.3, 0.0, 0.8);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    /// All four copies move toward the center.
    Forward,
    /// Horizontal copies move back out.
    Backward,
    /// Vertical copies move back out.
    Return,
}

/// How `speed` is interpreted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum StepMode {
    /// Pixels per frame, regardless of frame time.
    #[default]
    PerFrame,
    /// Pixels per second, scaled by the frame's elapsed time.
    PerSecond,
}

impl StepMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "per_frame" => Some(Self::PerFrame),
            "per_second" => Some(Self::PerSecond),
            _ => None,
        }
    }

    pub fn increment(self, speed: f32, dt: f32) -> f32 {
        match self {
            Self::PerFrame => speed,
            Self::PerSecond => speed * dt,
        }
    }
}

/// Field set of the converge/diverge animation.
///
/// `x1`/`x2` are the left/right copies, `y1`/`y2` the bottom/top ones. The
/// off-screen start positions are also the targets of the outward phases.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ConvergeState {
    pub x1: f32,
    pub x2: f32,
    pub y1: f32,
    pub y2: f32,
    pub center_x: f32,
    pub center_y: f32,
    pub forward: bool,
    pub backward_finished: bool,

    width: f32,
    height: f32,
    tex_w: f32,
    tex_h: f32,
}

impl ConvergeState {
    pub fn new(width: f32, height: f32, tex_w: f32, tex_h: f32) -> Self {
        Self {
            x1: -tex_w,
            x2: width,
            y1: height,
            y2: -tex_h,
            center_x: width / 2.0 - tex_w / 2.0,
            center_y: height / 2.0 - tex_h / 2.0,
            forward: true,
            backward_finished: false,
            width,
            height,
            tex_w,
            tex_h,
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.forward, self.backward_finished) {
            (true, _) => Phase::Forward,
            (false, false) => Phase::Backward,
            (false, true) => Phase::Return,
        }
    }

    pub fn converged(&self) -> bool {
        self.x1 >= self.center_x
            && self.x2 <= self.center_x
            && self.y1 <= self.center_y
            && self.y2 >= self.center_y
    }

    fn horizontal_out(&self) -> bool {
        self.x1 <= -self.tex_w && self.x2 >= self.width
    }

    fn vertical_out(&self) -> bool {
        self.y1 >= self.height && self.y2 <= -self.tex_h
    }

    /// Advances one frame. `step` is the horizontal increment; vertical
    /// fields use `step * VERTICAL_RATIO`.
    pub fn advance(&mut self, step: f32) {
        let v_step = step * VERTICAL_RATIO;

        if self.forward {
            self.x1 = step_toward(self.x1, self.center_x, step);
            self.x2 = step_toward(self.x2, self.center_x, step);
            self.y1 = step_toward(self.y1, self.center_y, v_step);
            self.y2 = step_toward(self.y2, self.center_y, v_step);
            if self.converged() {
                self.forward = false;
            }
            return;
        }

        self.x1 = step_toward(self.x1, -self.tex_w, step);
        self.x2 = step_toward(self.x2, self.width, step);
        if self.horizontal_out() {
            self.backward_finished = true;
        }

        // The return phase starts in the same frame the horizontal copies arrive.
        if self.backward_finished {
            self.y1 = step_toward(self.y1, self.height, v_step);
            self.y2 = step_toward(self.y2, -self.tex_h, v_step);
            if self.vertical_out() {
                self.forward = true;
                self.backward_finished = false;
            }
        }
    }
}

pub struct CornerConverge {
    texture_name: String,
    speed: f32,
    step_mode: StepMode,

    texture: Option<Arc<Texture2D>>,
    initial: ConvergeState,
    state: ConvergeState,
}

impl CornerConverge {
    pub fn from_params(params: &ActorParams) -> Result<Self, ActorError> {
        let speed = params.positive_f32_or("speed", 10.0)?;
        let texture_name = params.str_or("texture", "nginz.png")?.to_string();
        let step = params.str_or("step", "per_frame")?;
        let step_mode = StepMode::parse(step)
            .ok_or_else(|| ActorError::invalid(format!("'step' must be per_frame or per_second, got {step}")))?;

        let state = ConvergeState::new(0.0, 0.0, 0.0, 0.0);
        Ok(Self { texture_name, speed, step_mode, texture: None, initial: state, state })
    }

    pub fn state(&self) -> &ConvergeState {
        &self.state
    }
}

impl FrameActor for CornerConverge {
    fn name(&self) -> &str {
        NAME
    }

    fn initialize(&mut self, ctx: &mut InitCtx<'_>) -> Result<(), ActorError> {
        let texture = ctx.content.load::<Texture2D>(&self.texture_name)?;
        let res = ctx.resolution;
        self.initial = ConvergeState::new(
            res.width as f32,
            res.height as f32,
            texture.width() as f32,
            texture.height() as f32,
        );
        self.state = self.initial;
        self.texture = Some(texture);
        Ok(())
    }

    fn update(&mut self, ctx: &UpdateCtx<'_>) -> ActorControl {
        let was_forward = self.state.forward;
        self.state.advance(self.step_mode.increment(self.speed, ctx.dt()));
        if was_forward != self.state.forward {
            log::debug!("{NAME}: phase {:?} at frame {}", self.state.phase(), ctx.time.frame_index);
        }
        ActorControl::Continue
    }

    fn draw(&self, surface: &mut Surface, _time: &GameTime) {
        surface.clear(BACKGROUND);
    }

    fn draw2d(&self, batch: &mut SpriteBatch, _time: &GameTime) {
        let Some(texture) = &self.texture else { return };
        let s = &self.state;
        batch.draw(texture, Vec2::new(s.x1, s.center_y), Color::WHITE);
        batch.draw(texture, Vec2::new(s.center_x, s.y1), Color::WHITE);
        batch.draw(texture, Vec2::new(s.x2, s.center_y), Color::WHITE);
        batch.draw(texture, Vec2::new(s.center_x, s.y2), Color::WHITE);
    }

    fn reset(&mut self) {
        self.state = self.initial;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use stagehand_engine::content::ContentManager;
    use stagehand_engine::coords::Resolution;
    use stagehand_engine::input::{InputFrame, InputState};

    use super::*;

    // 250 wide with a 50px texture puts center_x at 100 and x1 at -50.
    fn scenario() -> ConvergeState {
        ConvergeState::new(250.0, 250.0, 50.0, 50.0)
    }

    #[test]
    fn x1_reaches_center_in_fifteen_steps() {
        let mut s = scenario();
        assert_eq!((s.x1, s.center_x), (-50.0, 100.0));

        for _ in 0..14 {
            s.advance(10.0);
        }
        assert_eq!(s.x1, 90.0);

        s.advance(10.0);
        assert_eq!(s.x1, 100.0);

        s.advance(10.0);
        assert_eq!(s.x1, 100.0);
        assert_eq!(s.x2, 100.0);
    }

    #[test]
    fn convergence_is_bounded_by_distance_over_speed() {
        for &(w, h, tw, th, step) in &[
            (1280.0, 720.0, 64.0, 64.0, 10.0),
            (800.0, 600.0, 33.0, 17.0, 7.5),
            (250.0, 250.0, 50.0, 50.0, 10.0),
        ] {
            let mut s = ConvergeState::new(w, h, tw, th);
            let x_dist = (s.center_x - s.x1).max(s.x2 - s.center_x);
            let y_dist = (s.y1 - s.center_y).max(s.center_y - s.y2);
            let bound = (x_dist / step).max(y_dist / (step * VERTICAL_RATIO)).ceil() as usize + 1;

            let mut steps = 0;
            while s.forward {
                s.advance(step);
                steps += 1;
                assert!(steps <= bound, "{w}x{h}: still converging after {steps} steps");
            }
            assert!(s.converged());
        }
    }

    #[test]
    fn forward_flips_exactly_once_per_convergence() {
        let mut s = scenario();
        let mut flips = 0;
        let mut prev = s.forward;
        // Two full cycles.
        for _ in 0..128 {
            s.advance(10.0);
            if prev && !s.forward {
                flips += 1;
            }
            prev = s.forward;
        }
        assert_eq!(flips, 2);
    }

    #[test]
    fn horizontal_copies_are_out_before_return_starts() {
        let mut s = scenario();
        while s.forward {
            s.advance(10.0);
        }
        let center_y = s.center_y;

        while !s.backward_finished {
            assert_eq!(s.phase(), Phase::Backward);
            assert_eq!(s.y1, center_y);
            s.advance(10.0);
        }
        assert_eq!(s.x1, -50.0);
        assert_eq!(s.x2, 250.0);
        // Return phase took its first step in the same frame.
        assert_eq!(s.y1, center_y + 6.0);
    }

    #[test]
    fn full_cycle_restores_initial_fields() {
        let initial = ConvergeState::new(1280.0, 720.0, 64.0, 48.0);
        let mut s = initial;
        let mut frames = 0;

        while s.forward {
            s.advance(10.0);
            frames += 1;
        }
        while !s.forward {
            s.advance(10.0);
            frames += 1;
            assert!(frames < 10_000);
        }
        assert_eq!(s, initial);
    }

    fn init(actor: &mut CornerConverge) {
        let mut content = ContentManager::new("unused");
        content.insert("nginz.png", Texture2D::blank("nginz.png", 50, 50));
        let mut ctx = InitCtx { content: &mut content, resolution: Resolution::new(250, 250) };
        actor.initialize(&mut ctx).unwrap();
    }

    fn tick(actor: &mut CornerConverge, dt: f32, frame_index: u64) {
        let input = InputState::default();
        let frame = InputFrame::default();
        let elapsed = Duration::from_secs_f32(dt);
        let ctx = UpdateCtx {
            input: &input,
            input_frame: &frame,
            time: GameTime::new(elapsed, elapsed, frame_index),
            resolution: Resolution::new(250, 250),
        };
        actor.update(&ctx);
    }

    #[test]
    fn actor_draws_four_copies_on_purple() {
        let mut actor = CornerConverge::from_params(&ActorParams::new()).unwrap();
        init(&mut actor);

        let mut surface = Surface::new();
        actor.draw(&mut surface, &GameTime::zero());
        assert_eq!(surface.clear_color(), Some(BACKGROUND));

        let mut batch = SpriteBatch::new();
        batch.begin();
        actor.draw2d(&mut batch, &GameTime::zero());
        batch.end();

        let positions: Vec<Vec2> = batch.items().iter().map(|i| i.sprite.position).collect();
        assert_eq!(
            positions,
            vec![
                Vec2::new(-50.0, 100.0),
                Vec2::new(100.0, 250.0),
                Vec2::new(250.0, 100.0),
                Vec2::new(100.0, -50.0),
            ]
        );
    }

    #[test]
    fn per_second_mode_scales_by_dt() {
        let params = ActorParams::new().with("speed", 100).with("step", "per_second");
        let mut actor = CornerConverge::from_params(&params).unwrap();
        init(&mut actor);

        tick(&mut actor, 0.25, 0);
        assert_eq!(actor.state().x1, -25.0);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut actor = CornerConverge::from_params(&ActorParams::new()).unwrap();
        init(&mut actor);
        for i in 0..30 {
            tick(&mut actor, 1.0 / 60.0, i);
        }
        assert!(!actor.state().forward);

        actor.reset();
        assert_eq!(actor.state().x1, -50.0);
        assert_eq!(actor.state().phase(), Phase::Forward);
    }

    #[test]
    fn rejects_bad_params() {
        let bad_speed = ActorParams::new().with("speed", 0);
        assert!(matches!(
            CornerConverge::from_params(&bad_speed),
            Err(ActorError::InvalidConfiguration(_))
        ));

        let bad_step = ActorParams::new().with("step", "per_minute");
        assert!(CornerConverge::from_params(&bad_step).is_err());
    }

    #[test]
    fn missing_texture_is_a_resource_error() {
        let mut actor = CornerConverge::from_params(&ActorParams::new()).unwrap();
        let mut content = ContentManager::new("does-not-exist");
        let mut ctx = InitCtx { content: &mut content, resolution: Resolution::new(10, 10) };
        assert!(matches!(actor.initialize(&mut ctx), Err(ActorError::ResourceLoad(_))));
    }
}
