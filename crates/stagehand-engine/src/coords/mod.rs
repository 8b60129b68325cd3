//! Coordinate and geometry types shared by actors and the host.
//!
//! Screen space:
//! - pixels
//! - origin top-left
//! - +X right, +Y down

mod rect;
mod resolution;
mod vec2;

pub use rect::Rect;
pub use resolution::Resolution;
pub use vec2::Vec2;
