//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single viewer window, and wires them to
//! the GPU backend and the image loader.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
