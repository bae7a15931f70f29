use vista_engine::coords::Viewport;
use vista_engine::core::{App, AppControl, AppCtx, AppEvent, FrameCtx, WindowCtx};
use vista_engine::imaging::{DecodeCompletion, ImageLoader, ImageSource};
use vista_engine::input::Key;
use vista_engine::paint::Color;
use vista_engine::render::PanelRenderer;
use vista_engine::renderer::{GraphicsBackend, ImageRenderer, RenderOutcome};
use vista_ui::{Notice, SidebarController, SidebarResponse, SidebarTheme};

pub const APP_NAME: &str = "vista";

/// Window background around the canvas.
const BACKGROUND: Color = Color::from_premul(0.07, 0.07, 0.09, 1.0);

/// The viewer application: sidebar on top, one rendered image underneath.
///
/// The sidebar and the image renderer never talk to each other; this type
/// routes events to one or the other.
pub struct Viewer {
    title: String,

    sidebar: SidebarController,
    theme: SidebarTheme,
    panels: PanelRenderer,

    renderer: ImageRenderer,
    pending: Option<ImageSource>,
    current: Option<ImageSource>,
}

impl Viewer {
    pub fn new(title: impl Into<String>, initial: Option<ImageSource>) -> Self {
        Self {
            title: title.into(),
            sidebar: SidebarController::new(),
            theme: SidebarTheme::default(),
            panels: PanelRenderer::new(),
            renderer: ImageRenderer::new(),
            pending: initial,
            current: None,
        }
    }

    fn present(&self, window: &WindowCtx<'_>, notice: Notice) {
        notice.log();
        window.set_title(&notice.window_title(&self.title));
    }

    /// Prepares the backend, then opens the image given at startup.
    ///
    /// When preparation fails the startup image is kept as the current source
    /// without opening it, so `O` can retry.
    fn start<B: GraphicsBackend>(&mut self, backend: &mut B, loader: &ImageLoader) -> Option<Notice> {
        // The sidebar needs a configured surface even before any image is chosen.
        if let Err(err) = self.renderer.prepare(backend) {
            if let Some(source) = self.pending.take() {
                self.current = Some(source);
            }
            return Some(err.into());
        }

        let source = self.pending.take()?;
        self.open(backend, loader, source)
    }

    /// Starts a render invocation and hands the decode to the loader.
    fn open<B: GraphicsBackend>(
        &mut self,
        backend: &mut B,
        loader: &ImageLoader,
        source: ImageSource,
    ) -> Option<Notice> {
        log::info!("opening {}", source.label());
        self.current = Some(source.clone());

        match self.renderer.begin(backend) {
            Ok(generation) => {
                loader.load(generation, source);
                None
            }
            Err(err) => Some(err.into()),
        }
    }

    /// Re-runs the whole sequence for the current image on this thread.
    fn rerender<B: GraphicsBackend>(&mut self, backend: &mut B) -> Option<Notice> {
        let Some(source) = self.current.clone() else {
            log::debug!("nothing to re-render");
            return None;
        };

        match self.renderer.render(backend, &source) {
            Ok(outcome) => report(source.label(), outcome),
            Err(err) => Some(err.into()),
        }
    }

    fn finish<B: GraphicsBackend>(&mut self, backend: &mut B, completion: DecodeCompletion) -> Option<Notice> {
        let DecodeCompletion { generation, label, result } = completion;

        match self.renderer.complete(backend, generation, result) {
            Ok(outcome) => report(label, outcome),
            Err(err) => Some(err.into()),
        }
    }

    /// Routes every event except `Esc` to the sidebar or the image renderer.
    fn route<B: GraphicsBackend>(
        &mut self,
        backend: &mut B,
        loader: &ImageLoader,
        viewport: Viewport,
        event: AppEvent,
    ) -> Option<Notice> {
        match event {
            AppEvent::Resized(viewport) => {
                self.sidebar.on_viewport(viewport.width);
                None
            }

            AppEvent::Click(pos) => match self.sidebar.on_click(pos, viewport) {
                SidebarResponse::Menu(action) => action.activate(),
                SidebarResponse::Toggled => {
                    log::debug!("sidebar toggled: {:?}", self.sidebar.classes());
                    None
                }
                SidebarResponse::Ignored => None,
            },

            AppEvent::Key(Key::M) => {
                self.sidebar.toggle();
                None
            }
            AppEvent::Key(Key::O) => {
                let source = self.current.clone()?;
                self.open(backend, loader, source)
            }
            AppEvent::Key(Key::R) => self.rerender(backend),
            AppEvent::Key(_) => None,

            AppEvent::FileDropped(path) => self.open(backend, loader, ImageSource::Path(path)),

            AppEvent::ImageDecoded(completion) => self.finish(backend, completion),
        }
    }
}

fn report(label: String, outcome: RenderOutcome) -> Option<Notice> {
    match outcome {
        RenderOutcome::Drawn { size, .. } => Some(Notice::ImageShown { label, size }),
        RenderOutcome::Stale { generation, latest } => {
            log::debug!("dropped {label} from {generation}; {latest} is newer");
            None
        }
    }
}

impl App for Viewer {
    fn on_start(&mut self, ctx: &mut AppCtx<'_, '_>) -> AppControl {
        if let Some(notice) = self.start(ctx.backend, ctx.loader) {
            self.present(&ctx.window, notice);
        }
        AppControl::Continue
    }

    fn on_event(&mut self, ctx: &mut AppCtx<'_, '_>, event: AppEvent) -> AppControl {
        if let AppEvent::Key(Key::Escape) = event {
            return AppControl::Exit;
        }

        let viewport = ctx.window.viewport();
        if let Some(notice) = self.route(ctx.backend, ctx.loader, viewport, event) {
            self.present(&ctx.window, notice);
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let quads = self.sidebar.layout(ctx.window.viewport()).quads(&self.theme);
        let panels = &mut self.panels;

        ctx.render(BACKGROUND, |rctx, target| {
            panels.render(rctx, target, &quads);
        })
    }
}
