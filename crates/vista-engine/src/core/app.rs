use std::path::PathBuf;

use crate::coords::{Vec2, Viewport};
use crate::imaging::DecodeCompletion;
use crate::input::Key;

use super::ctx::{AppCtx, FrameCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// High-level window events delivered to the application.
///
/// Coordinates and sizes are in logical pixels.
#[derive(Debug)]
pub enum AppEvent {
    /// The window's logical size changed (also sent after a scale change).
    Resized(Viewport),
    /// Primary-button click at the pointer position.
    Click(Vec2),
    /// A key went down (repeats are filtered out).
    Key(Key),
    /// A file was dropped onto the window.
    FileDropped(PathBuf),
    /// An off-thread decode finished.
    ImageDecoded(DecodeCompletion),
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once, right after the window is created.
    fn on_start(&mut self, ctx: &mut AppCtx<'_, '_>) -> AppControl {
        let _ = ctx;
        AppControl::Continue
    }

    /// Called for every translated window or loader event.
    fn on_event(&mut self, ctx: &mut AppCtx<'_, '_>, event: AppEvent) -> AppControl;

    /// Called once per presented window frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
