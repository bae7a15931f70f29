//! Colors shared between the UI layer and the renderers.

pub mod color;

pub use color::Color;
