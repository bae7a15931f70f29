//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the runtime (platform loop)
//! and the viewer. It avoids leaking winit event types into user code.

mod app;
mod ctx;

pub use app::{App, AppControl, AppEvent};
pub use ctx::{AppCtx, FrameCtx, WindowCtx};
