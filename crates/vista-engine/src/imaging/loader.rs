use std::sync::Arc;
use std::thread;

use crate::renderer::{Generation, RenderError};

use super::{DecodedImage, ImageSource};

/// Result of one off-thread decode, tagged with the invocation that asked for it.
#[derive(Debug)]
pub struct DecodeCompletion {
    pub generation: Generation,
    pub label: String,
    pub result: Result<DecodedImage, RenderError>,
}

type Sink = Arc<dyn Fn(DecodeCompletion) + Send + Sync>;

/// Decodes image sources on worker threads.
///
/// Completions are handed to the sink in whatever order the workers finish;
/// ordering is restored by the receiver through the generation tag. An
/// in-flight decode cannot be cancelled.
#[derive(Clone)]
pub struct ImageLoader {
    sink: Sink,
}

impl ImageLoader {
    pub fn new(sink: impl Fn(DecodeCompletion) + Send + Sync + 'static) -> Self {
        Self { sink: Arc::new(sink) }
    }

    /// Starts decoding `source` for `generation`.
    pub fn load(&self, generation: Generation, source: ImageSource) {
        let sink = self.sink.clone();
        let label = source.label();

        log::debug!("decode {generation} started: {label}");

        let spawned = thread::Builder::new()
            .name(format!("vista-decode-{}", generation.get()))
            .spawn({
                let sink = sink.clone();
                let label = label.clone();
                move || {
                    let result = source.decode();
                    sink(DecodeCompletion { generation, label, result });
                }
            });

        if let Err(e) = spawned {
            log::warn!("failed to spawn decode thread: {e}");
            sink(DecodeCompletion {
                generation,
                label: label.clone(),
                result: Err(RenderError::ImageDecode {
                    source_label: label,
                    reason: format!("failed to start decoder: {e}"),
                }),
            });
        }
    }
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::renderer::GenerationCounter;

    fn channel_loader() -> (ImageLoader, mpsc::Receiver<DecodeCompletion>) {
        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);
        let loader = ImageLoader::new(move |c| {
            let _ = tx.lock().map(|tx| tx.send(c));
        });
        (loader, rx)
    }

    #[test]
    fn completion_carries_generation_and_error() {
        let (loader, rx) = channel_loader();
        let mut gens = GenerationCounter::new();
        let g = gens.advance();

        loader.load(g, ImageSource::from_bytes("bad", b"nope".to_vec()));

        let done = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(done.generation, g);
        assert_eq!(done.label, "bad");
        assert!(matches!(done.result, Err(RenderError::ImageDecode { .. })));
    }

    #[test]
    fn every_load_completes_once() {
        let (loader, rx) = channel_loader();
        let mut gens = GenerationCounter::new();
        for _ in 0..3 {
            loader.load(gens.advance(), ImageSource::from_bytes("x", b"x".to_vec()));
        }

        let mut seen: Vec<u64> = (0..3)
            .map(|_| rx.recv_timeout(Duration::from_secs(10)).unwrap().generation.get())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3]);
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }
}
