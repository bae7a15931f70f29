//! GPU device + surface management.
//!
//! This module is responsible for:
//! - probing whether any wgpu backend is usable on this host
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - configuring the window Surface (swapchain)
//! - acquiring frames and providing encoders/views for presentation

mod frame;
mod gpu;
mod init;
mod surface;

pub use frame::{GpuFrame, SurfaceErrorAction};
pub use gpu::Gpu;
pub use init::GpuInit;
