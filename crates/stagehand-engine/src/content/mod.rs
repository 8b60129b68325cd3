//! Content loading and context-thread scheduling.

mod context;
mod manager;
mod texture;

pub use context::{ContextHandle, ContextJob, ContextQueue};
pub use manager::{Asset, ContentManager};
pub use texture::{Interpolation, Texture2D, TextureConfig};
