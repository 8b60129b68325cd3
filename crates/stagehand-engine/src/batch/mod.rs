//! Immediate-mode draw recording.
//!
//! - `SpriteBatch` collects textured quads for one frame in a deterministic
//!   order (depth, then submission order)
//! - `Surface` carries frame-level state such as the clear color

mod key;
mod list;
mod sprite;
mod surface;

pub use key::SortKey;
pub use list::{BatchItem, SpriteBatch};
pub use sprite::Sprite;
pub use surface::Surface;
