//! Built-in actors for the stagehand host.
//!
//! - `corner_converge`: four copies of a texture converge on the center and
//!   diverge again
//! - `mascot`: WASD/arrow movement with a fireball charged by the mouse
//! - `fireball`: an animated fireball falling through the screen

pub mod corner_converge;
pub mod fireball;
pub mod mascot;
mod stepper;

use stagehand_engine::core::{ActorRegistry, FrameActor};

pub use corner_converge::{ConvergeState, CornerConverge, Phase, StepMode};
pub use fireball::Fireball;
pub use mascot::Mascot;
pub use stepper::step_toward;

/// Registers every built-in actor under its manifest name.
pub fn register_builtin(registry: &mut ActorRegistry) {
    registry
        .register(corner_converge::NAME, |params| {
            Ok(Box::new(CornerConverge::from_params(params)?) as Box<dyn FrameActor>)
        })
        .register(mascot::NAME, |params| Ok(Box::new(Mascot::from_params(params)?) as Box<dyn FrameActor>))
        .register(fireball::NAME, |params| Ok(Box::new(Fireball::from_params(params)?) as Box<dyn FrameActor>));
}

/// A registry holding only the built-in actors.
pub fn builtin_registry() -> ActorRegistry {
    let mut registry = ActorRegistry::new();
    register_builtin(&mut registry);
    registry
}
