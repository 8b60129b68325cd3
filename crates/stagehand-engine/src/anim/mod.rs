//! Sprite sheet animation.

mod animator;
mod sheet;

pub use animator::Animator;
pub use sheet::SpriteSheet;
