use std::sync::Mutex;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::coords::Vec2;
use crate::core::{App as CoreApp, AppControl, AppCtx, AppEvent, FrameCtx, WindowCtx};
use crate::device::GpuInit;
use crate::imaging::{DecodeCompletion, ImageLoader};
use crate::input::{ButtonState, InputAction, InputEvent, InputState, Key, MouseButton};
use crate::renderer::WgpuBackend;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "vista".to_string(),
            initial_size: LogicalSize::new(1024.0, 768.0),
        }
    }
}

impl RuntimeConfig {
    pub fn new(title: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            title: title.into(),
            initial_size: LogicalSize::new(width, height),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and runs `app` until it exits or the window closes.
    ///
    /// Decode completions from the returned loader are delivered back on the
    /// event loop thread as [`AppEvent::ImageDecoded`].
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::<DecodeCompletion>::with_user_event()
            .build()
            .context("failed to create winit EventLoop")?;

        let proxy = Mutex::new(event_loop.create_proxy());
        let loader = ImageLoader::new(move |completion| {
            let Ok(proxy) = proxy.lock() else {
                return;
            };
            if proxy.send_event(completion).is_err() {
                log::debug!("event loop closed; decode result dropped");
            }
        });

        let mut state = AppState::new(config, gpu_init, loader, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    input: InputState,

    window: Window,

    #[borrows(window)]
    #[covariant]
    backend: WgpuBackend<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    loader: ImageLoader,
    app: A,

    entry: Option<WindowEntry>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, loader: ImageLoader, app: A) -> Self {
        Self {
            config,
            gpu_init,
            loader,
            app,
            entry: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        // The GPU is not touched here; the first render invocation acquires it.
        let entry = WindowEntryBuilder {
            input: InputState::default(),
            window,
            backend_builder: |w| WgpuBackend::new(w, gpu_init),
        }
        .build();

        self.entry = Some(entry);
        Ok(())
    }

    /// Runs `f` as an app callback with a fresh [`AppCtx`].
    fn with_app_ctx<F>(&mut self, event_loop: &ActiveEventLoop, f: F)
    where
        F: FnOnce(&mut A, &mut AppCtx<'_, '_>) -> AppControl,
    {
        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, loader, entry) = (&mut self.app, &self.loader, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return;
        };

        let control = entry.with_mut(|fields| {
            let mut ctx = AppCtx {
                window: WindowCtx {
                    id: fields.window.id(),
                    window: fields.window,
                },
                backend: fields.backend,
                loader,
            };
            let control = f(app, &mut ctx);
            fields.window.request_redraw();
            control
        });

        if control == AppControl::Exit {
            self.request_exit(event_loop);
        }
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, event: AppEvent) {
        self.with_app_ctx(event_loop, |app, ctx| app.on_event(ctx, event));
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return;
        };

        let control = entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id: fields.window.id(),
                    window: fields.window,
                },
                backend: fields.backend,
            };
            app.on_frame(&mut ctx)
        });

        if control == AppControl::Exit {
            self.request_exit(event_loop);
        }
    }

    fn current_viewport_event(&self) -> Option<AppEvent> {
        self.entry.as_ref().map(|entry| {
            entry.with_window(|w| {
                let ctx = WindowCtx { id: w.id(), window: w };
                AppEvent::Resized(ctx.viewport())
            })
        })
    }
}

impl<A> ApplicationHandler<DecodeCompletion> for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.request_exit(event_loop);
            return;
        }

        self.with_app_ctx(event_loop, |app, ctx| app.on_start(ctx));

        // Initial layout pass, before any resize notification arrives.
        if let Some(event) = self.current_viewport_event() {
            self.dispatch(event_loop, event);
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, completion: DecodeCompletion) {
        if self.exit_requested {
            return;
        }
        self.dispatch(event_loop, AppEvent::ImageDecoded(completion));
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Redraws are requested by events and by the canvas draw itself.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let action = entry.with_mut(|fields| {
            translate_input_event(fields.window, &event)
                .map(|ev| fields.input.apply_event(&ev))
                .unwrap_or(InputAction::None)
        });

        match action {
            InputAction::Click(pos) => self.dispatch(event_loop, AppEvent::Click(pos)),
            InputAction::KeyPressed(key) => self.dispatch(event_loop, AppEvent::Key(key)),
            InputAction::None => {}
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_backend_mut(|backend| backend.resize_surface(*new_size));
                }
                if let Some(event) = self.current_viewport_event() {
                    self.dispatch(event_loop, event);
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_backend_mut(|backend| backend.resize_surface(new_size));
                }
                if let Some(event) = self.current_viewport_event() {
                    self.dispatch(event_loop, event);
                }
            }

            WindowEvent::DroppedFile(path) => {
                self.dispatch(event_loop, AppEvent::FileDropped(path.clone()));
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn translate_input_event(window: &Window, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            Some(InputEvent::PointerMoved(to_logical(window, *position)))
        }

        WindowEvent::MouseInput { state, button, .. } => Some(InputEvent::PointerButton {
            button: map_mouse_button(*button),
            state: map_state(*state),
        }),

        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: map_key(event.physical_key),
            state: map_state(event.state),
            repeat: event.repeat,
        }),

        _ => None,
    }
}

fn to_logical(window: &Window, pos: PhysicalPosition<f64>) -> Vec2 {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    Vec2::new(logical.x as f32, logical.y as f32)
}

fn map_state(s: ElementState) -> ButtonState {
    match s {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Space => Key::Space,
            KeyCode::KeyM => Key::M,
            KeyCode::KeyO => Key::O,
            KeyCode::KeyR => Key::R,
            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode is not a u32 in winit 0.30.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}
