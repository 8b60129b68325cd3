//! Input subsystem.
//!
//! Platform-agnostic: whatever drives the stage translates its window events
//! into `InputEvent`s, or replays them from an `InputTimeline`.

mod frame;
mod state;
mod timeline;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use timeline::{InputTimeline, ScriptedInput, TimelineEntry};
pub use types::{ButtonState, InputEvent, Key, MouseButton};
