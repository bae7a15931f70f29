use thiserror::Error;

use crate::coords::PixelSize;

/// Failure of one image render invocation.
///
/// Every variant aborts the whole invocation; nothing is retried and nothing is
/// partially kept. The caller decides how to present it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The host exposes no usable graphics API.
    #[error("graphics is not supported on this platform: {reason}")]
    UnsupportedPlatform { reason: String },

    /// No adapter, or the adapter refused to create a device.
    #[error("could not acquire a graphics device: {reason}")]
    DeviceAcquisition { reason: String },

    /// The window surface could not be bound to the device.
    #[error("could not configure the window surface: {reason}")]
    SurfaceConfiguration { reason: String },

    /// The image source could not be read or decoded.
    #[error("could not decode image {source_label}: {reason}")]
    ImageDecode { source_label: String, reason: String },

    /// The decoded image does not fit in a single texture on this device.
    #[error("image is {size}, larger than the device limit of {max}px per side")]
    ImageTooLarge { size: PixelSize, max: u32 },

    /// A step that requires earlier state ran without it (e.g. draw before bind).
    #[error("render step failed: {reason}")]
    Draw { reason: String },
}

impl RenderError {
    /// Short stable identifier, handy for logs and tests.
    pub fn kind(&self) -> &'static str {
        match self {
            RenderError::UnsupportedPlatform { .. } => "unsupported-platform",
            RenderError::DeviceAcquisition { .. } => "device-acquisition",
            RenderError::SurfaceConfiguration { .. } => "surface-configuration",
            RenderError::ImageDecode { .. } => "image-decode",
            RenderError::ImageTooLarge { .. } => "image-too-large",
            RenderError::Draw { .. } => "draw",
        }
    }

    pub(crate) fn draw(reason: impl Into<String>) -> Self {
        RenderError::Draw { reason: reason.into() }
    }
}
