//! Single-frame image renderer.
//!
//! [`ImageRenderer`] owns the ordering of one render invocation and the
//! generation counter that discards stale completions; [`GraphicsBackend`] is
//! the seam to the graphics API, implemented for wgpu by [`WgpuBackend`].

mod backend;
mod error;
mod generation;
mod sequence;
mod wgpu_backend;

pub use backend::GraphicsBackend;
pub use error::RenderError;
pub use generation::{Generation, GenerationCounter};
pub use sequence::{ImageRenderer, RenderOutcome};
pub use wgpu_backend::WgpuBackend;
