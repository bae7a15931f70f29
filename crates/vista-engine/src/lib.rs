//! Vista engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by higher layers:
//! the window loop, GPU device management, image decoding and the single-frame
//! image renderer.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod imaging;
pub mod render;
pub mod renderer;
pub mod paint;
