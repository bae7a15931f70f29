//! Coordinate and geometry types shared by the engine and the UI layer.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::{PixelSize, Viewport};
