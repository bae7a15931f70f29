//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The window runtime translates platform events into [`InputEvent`]s and feeds
//! them to an [`InputState`], which turns press/release pairs into clicks.

mod state;
mod types;

pub use state::{InputAction, InputState};
pub use types::{ButtonState, InputEvent, Key, MouseButton};
