use crate::coords::PixelSize;
use crate::imaging::{DecodedImage, ImageSource};

use super::{GraphicsBackend, Generation, GenerationCounter, RenderError};

/// What a completed invocation did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The image was drawn; the canvas now has exactly this size.
    Drawn { generation: Generation, size: PixelSize },
    /// A newer invocation started meanwhile; this completion was discarded
    /// without touching the backend.
    Stale { generation: Generation, latest: Generation },
}

/// Single-frame image renderer.
///
/// Drives a [`GraphicsBackend`] through the fixed render sequence:
///
/// 1. capability check
/// 2. device acquisition
/// 3. surface configuration
/// 4. image decode (outside the renderer, possibly on another thread)
/// 5. texture upload
/// 6. canvas resize
/// 7. pipeline construction (once, then reused)
/// 8. bind group construction
/// 9. one draw + submit
///
/// Steps 1–3 run in [`begin`](Self::begin), 5–9 in [`complete`](Self::complete).
/// Any failure aborts the invocation.
#[derive(Debug, Default)]
pub struct ImageRenderer {
    generations: GenerationCounter,
}

impl ImageRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation of the newest invocation, if any was started.
    pub fn latest(&self) -> Option<Generation> {
        self.generations.latest()
    }

    /// Runs steps 1–3 without starting an invocation.
    ///
    /// Used at startup so the host can present its own UI before any image is
    /// chosen. Idempotent on a backend that already holds a device.
    pub fn prepare<B: GraphicsBackend>(&self, backend: &mut B) -> Result<(), RenderError> {
        if !backend.probe() {
            return Err(RenderError::UnsupportedPlatform {
                reason: "no graphics backend is available".into(),
            });
        }
        backend.acquire_device()?;
        backend.configure_surface()
    }

    /// Starts a new invocation and runs steps 1–3.
    ///
    /// The generation advances even when a step fails, so completions from
    /// older invocations that are still decoding get discarded.
    pub fn begin<B: GraphicsBackend>(&mut self, backend: &mut B) -> Result<Generation, RenderError> {
        let generation = self.generations.advance();
        self.prepare(backend)?;
        log::debug!("render {generation}: device ready");
        Ok(generation)
    }

    /// Runs steps 5–9 with the decode result of `generation`.
    pub fn complete<B: GraphicsBackend>(
        &mut self,
        backend: &mut B,
        generation: Generation,
        decoded: Result<DecodedImage, RenderError>,
    ) -> Result<RenderOutcome, RenderError> {
        if let Some(latest) = self.generations.latest() {
            if !self.generations.is_current(generation) {
                log::debug!("render {generation}: discarded, {latest} is newer");
                return Ok(RenderOutcome::Stale { generation, latest });
            }
        }

        let image = decoded?;
        let size = image.size();

        backend.upload_texture(&image)?;
        backend.resize_canvas(size)?;
        backend.ensure_pipeline()?;
        backend.bind_texture()?;
        backend.draw()?;

        log::info!("render {generation}: drew {size} image");
        Ok(RenderOutcome::Drawn { generation, size })
    }

    /// Runs the whole sequence inline, decoding on the calling thread.
    pub fn render<B: GraphicsBackend>(
        &mut self,
        backend: &mut B,
        source: &ImageSource,
    ) -> Result<RenderOutcome, RenderError> {
        let generation = self.begin(backend)?;
        let decoded = source.decode();
        self.complete(backend, generation, decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        AcquireDevice,
        ConfigureSurface,
        UploadTexture(PixelSize),
        ResizeCanvas(PixelSize),
        EnsurePipeline,
        BindTexture,
        Draw,
    }

    /// Records every step and keeps just enough state to check ordering.
    #[derive(Default)]
    struct RecordingBackend {
        calls: Vec<Call>,
        unsupported: bool,
        no_adapter: bool,
        max_texture: Option<u32>,
        canvas: Option<PixelSize>,
        pipelines_built: usize,
    }

    impl RecordingBackend {
        fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.iter().filter(|c| pred(c)).count()
        }

        fn allocations(&self) -> usize {
            self.count(|c| {
                matches!(
                    c,
                    Call::UploadTexture(_) | Call::EnsurePipeline | Call::BindTexture | Call::Draw
                )
            })
        }
    }

    impl GraphicsBackend for RecordingBackend {
        fn probe(&self) -> bool {
            !self.unsupported
        }

        fn acquire_device(&mut self) -> Result<(), RenderError> {
            self.calls.push(Call::AcquireDevice);
            if self.no_adapter {
                return Err(RenderError::DeviceAcquisition { reason: "no adapter".into() });
            }
            Ok(())
        }

        fn configure_surface(&mut self) -> Result<(), RenderError> {
            self.calls.push(Call::ConfigureSurface);
            Ok(())
        }

        fn upload_texture(&mut self, image: &DecodedImage) -> Result<(), RenderError> {
            self.calls.push(Call::UploadTexture(image.size()));
            if let Some(max) = self.max_texture {
                if image.size().max_side() > max {
                    return Err(RenderError::ImageTooLarge { size: image.size(), max });
                }
            }
            Ok(())
        }

        fn resize_canvas(&mut self, size: PixelSize) -> Result<(), RenderError> {
            self.calls.push(Call::ResizeCanvas(size));
            self.canvas = Some(size);
            Ok(())
        }

        fn ensure_pipeline(&mut self) -> Result<(), RenderError> {
            self.calls.push(Call::EnsurePipeline);
            if self.pipelines_built == 0 {
                self.pipelines_built = 1;
            }
            Ok(())
        }

        fn bind_texture(&mut self) -> Result<(), RenderError> {
            self.calls.push(Call::BindTexture);
            Ok(())
        }

        fn draw(&mut self) -> Result<(), RenderError> {
            self.calls.push(Call::Draw);
            Ok(())
        }

        fn canvas_size(&self) -> Option<PixelSize> {
            self.canvas
        }
    }

    fn red(w: u32, h: u32) -> DecodedImage {
        DecodedImage::solid(w, h, [255, 0, 0, 255]).unwrap()
    }

    #[test]
    fn runs_steps_in_order() {
        let mut backend = RecordingBackend::default();
        let mut renderer = ImageRenderer::new();

        let g = renderer.begin(&mut backend).unwrap();
        let outcome = renderer.complete(&mut backend, g, Ok(red(4, 2))).unwrap();

        let size = PixelSize::new(4, 2);
        assert_eq!(outcome, RenderOutcome::Drawn { generation: g, size });
        assert_eq!(
            backend.calls,
            vec![
                Call::AcquireDevice,
                Call::ConfigureSurface,
                Call::UploadTexture(size),
                Call::ResizeCanvas(size),
                Call::EnsurePipeline,
                Call::BindTexture,
                Call::Draw,
            ]
        );
    }

    #[test]
    fn canvas_matches_image_size() {
        let mut backend = RecordingBackend::default();
        let mut renderer = ImageRenderer::new();

        for (w, h) in [(256, 256), (1, 1), (640, 17), (3, 900)] {
            let g = renderer.begin(&mut backend).unwrap();
            renderer.complete(&mut backend, g, Ok(red(w, h))).unwrap();
            assert_eq!(backend.canvas_size(), Some(PixelSize::new(w, h)));
        }
    }

    #[test]
    fn draws_exactly_once_per_invocation() {
        let mut backend = RecordingBackend::default();
        let mut renderer = ImageRenderer::new();

        for n in 1..=3 {
            let g = renderer.begin(&mut backend).unwrap();
            renderer.complete(&mut backend, g, Ok(red(8, 8))).unwrap();
            assert_eq!(backend.count(|c| *c == Call::Draw), n);
        }
        assert_eq!(backend.pipelines_built, 1);
    }

    #[test]
    fn decode_failure_allocates_nothing() {
        let mut backend = RecordingBackend::default();
        let mut renderer = ImageRenderer::new();

        let src = ImageSource::from_bytes("broken.png", b"\x89PNG but not really".to_vec());
        let err = renderer.render(&mut backend, &src).unwrap_err();

        assert_eq!(err.kind(), "image-decode");
        assert_eq!(backend.allocations(), 0);
        assert_eq!(backend.count(|c| matches!(c, Call::ResizeCanvas(_))), 0);
        assert_eq!(backend.canvas_size(), None);
    }

    #[test]
    fn unsupported_platform_never_configures_surface() {
        let mut backend = RecordingBackend { unsupported: true, ..Default::default() };
        let mut renderer = ImageRenderer::new();

        let err = renderer.begin(&mut backend).unwrap_err();

        assert!(matches!(err, RenderError::UnsupportedPlatform { .. }));
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn device_failure_is_distinct_from_decode_failure() {
        let mut backend = RecordingBackend { no_adapter: true, ..Default::default() };
        let mut renderer = ImageRenderer::new();

        let err = renderer.render(&mut backend, &ImageSource::from_bytes("x", vec![1])).unwrap_err();

        assert_eq!(err.kind(), "device-acquisition");
        assert_eq!(backend.calls, vec![Call::AcquireDevice]);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut backend = RecordingBackend::default();
        let mut renderer = ImageRenderer::new();

        let first = renderer.begin(&mut backend).unwrap();
        let second = renderer.begin(&mut backend).unwrap();

        // The newer image finishes first, then the old one arrives late.
        renderer.complete(&mut backend, second, Ok(red(2, 2))).unwrap();
        let late = renderer.complete(&mut backend, first, Ok(red(9, 9))).unwrap();

        assert_eq!(late, RenderOutcome::Stale { generation: first, latest: second });
        assert_eq!(backend.canvas_size(), Some(PixelSize::new(2, 2)));
        assert_eq!(backend.count(|c| *c == Call::Draw), 1);
    }

    #[test]
    fn stale_decode_error_is_silent() {
        let mut backend = RecordingBackend::default();
        let mut renderer = ImageRenderer::new();

        let first = renderer.begin(&mut backend).unwrap();
        let _second = renderer.begin(&mut backend).unwrap();
        let err = RenderError::ImageDecode { source_label: "old".into(), reason: "bad".into() };

        let outcome = renderer.complete(&mut backend, first, Err(err));
        assert!(matches!(outcome, Ok(RenderOutcome::Stale { .. })));
    }

    #[test]
    fn failed_begin_still_invalidates_older_invocations() {
        let mut backend = RecordingBackend::default();
        let mut renderer = ImageRenderer::new();

        let first = renderer.begin(&mut backend).unwrap();
        backend.no_adapter = true;
        assert!(renderer.begin(&mut backend).is_err());
        backend.no_adapter = false;

        let outcome = renderer.complete(&mut backend, first, Ok(red(2, 2))).unwrap();
        assert!(matches!(outcome, RenderOutcome::Stale { .. }));
    }

    #[test]
    fn oversized_image_aborts_before_canvas_resize() {
        let mut backend = RecordingBackend { max_texture: Some(64), ..Default::default() };
        let mut renderer = ImageRenderer::new();

        let g = renderer.begin(&mut backend).unwrap();
        let err = renderer.complete(&mut backend, g, Ok(red(65, 10))).unwrap_err();

        assert_eq!(err.kind(), "image-too-large");
        assert_eq!(backend.canvas_size(), None);
        assert_eq!(backend.count(|c| *c == Call::Draw), 0);
    }

    #[test]
    fn red_image_end_to_end() {
        let mut backend = RecordingBackend::default();
        let mut renderer = ImageRenderer::new();

        let img = image::RgbaImage::from_pixel(256, 256, image::Rgba([255, 0, 0, 255]));
        let mut png = std::io::Cursor::new(Vec::new());
        img.write_to(&mut png, image::ImageFormat::Png).unwrap();
        let src = ImageSource::from_bytes("red.png", png.into_inner());

        let outcome = renderer.render(&mut backend, &src).unwrap();

        assert!(matches!(outcome, RenderOutcome::Drawn { .. }));
        assert_eq!(backend.canvas_size(), Some(PixelSize::new(256, 256)));
    }
}
