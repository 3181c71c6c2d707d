//! Color model shared between geometry generators and renderers.

mod color;

pub use color::Color;
