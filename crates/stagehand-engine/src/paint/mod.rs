//! Color model shared by actors and the sprite batch.

pub mod color;

pub use color::Color;
