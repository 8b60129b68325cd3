//! Stagehand engine crate.
//!
//! Host services for frame actors: the actor contract and the `Stage` that
//! drives it, content loading pinned to a context thread, input, timing,
//! sprite batching and sprite sheet animation. Presentation is left to the
//! caller; a frame produces a `SpriteBatch` and a `Surface`.

pub mod anim;
pub mod batch;
pub mod config;
pub mod content;
pub mod core;
pub mod error;
pub mod input;
pub mod logging;
pub mod reload;
pub mod time;

pub mod coords;
pub mod paint;
