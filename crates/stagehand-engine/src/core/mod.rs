//! Actor contract and the stage that hosts it.
//!
//! This module defines the stable interface between the host loop and
//! behaviour code: actors see only `InitCtx`/`UpdateCtx` and the draw
//! targets, never the stage itself.

mod app;
mod ctx;
mod params;
mod registry;
mod stage;

pub use app::{ActorControl, FrameActor};
pub use ctx::{InitCtx, UpdateCtx};
pub use params::ActorParams;
pub use registry::{ActorFactory, ActorRegistry, ActorSpec};
pub use stage::{FrameReport, Stage};
