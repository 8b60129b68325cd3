use crate::batch::{SpriteBatch, Surface};
use crate::error::ActorError;
use crate::time::GameTime;

use super::ctx::{InitCtx, UpdateCtx};

/// Control directive returned from `FrameActor::update`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ActorControl {
    #[default]
    Continue,
    /// Ask the host to shut down after this frame.
    Exit,
}

/// Behaviour contract the stage drives every frame.
///
/// Call order: `initialize` once, then per frame `update` → `draw` → `draw2d`.
/// All state changes happen in `initialize`, `update` and `reset`; the draw
/// hooks only read state and record output.
pub trait FrameActor {
    /// Registry name, used in logs.
    fn name(&self) -> &str;

    /// Acquires resources and sets up initial state. Runs on the context thread.
    fn initialize(&mut self, ctx: &mut InitCtx<'_>) -> Result<(), ActorError>;

    /// Advances state by one frame.
    fn update(&mut self, ctx: &UpdateCtx<'_>) -> ActorControl;

    /// Frame-level output such as the clear color.
    fn draw(&self, surface: &mut Surface, time: &GameTime) {
        let _ = (surface, time);
    }

    /// Sprite output. The batch is already between `begin` and `end`.
    fn draw2d(&self, batch: &mut SpriteBatch, time: &GameTime) {
        let _ = (batch, time);
    }

    /// Returns every field to its post-`initialize` value.
    fn reset(&mut self);
}
