use std::path::PathBuf;
use std::sync::Arc;

use crate::renderer::RenderError;

use super::DecodedImage;

/// Where the pixels of one render invocation come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A file on disk, e.g. dropped on the window or given on the command line.
    Path(PathBuf),
    /// Encoded bytes already in memory (PNG, JPEG, ...).
    Bytes { label: String, bytes: Arc<[u8]> },
}

impl ImageSource {
    pub fn from_bytes(label: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        ImageSource::Bytes {
            label: label.into(),
            bytes: bytes.into(),
        }
    }

    /// Human-readable name used in logs and notices.
    pub fn label(&self) -> String {
        match self {
            ImageSource::Path(p) => p
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string()),
            ImageSource::Bytes { label, .. } => label.clone(),
        }
    }

    /// Reads and decodes the source to RGBA8.
    ///
    /// The format is guessed from the content, not from the file extension.
    pub fn decode(&self) -> Result<DecodedImage, RenderError> {
        let fail = |reason: String| RenderError::ImageDecode {
            source_label: self.label(),
            reason,
        };

        let dynimg = match self {
            ImageSource::Path(path) => image::ImageReader::open(path)
                .map_err(|e| fail(e.to_string()))?
                .with_guessed_format()
                .map_err(|e| fail(e.to_string()))?
                .decode(),
            ImageSource::Bytes { bytes, .. } => image::load_from_memory(bytes),
        }
        .map_err(|e| fail(e.to_string()))?;

        let rgba = dynimg.to_rgba8();
        let (width, height) = rgba.dimensions();
        DecodedImage::from_rgba8(width, height, rgba.into_raw())
            .ok_or_else(|| fail(format!("decoder produced an empty {width}x{height} image")))
    }
}
