use std::fmt;

use vista_engine::coords::PixelSize;
use vista_engine::renderer::RenderError;

/// Something the user should be told about.
///
/// Notices are non-blocking: the viewer logs them and shows the latest one in
/// the window title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A menu entry without an assigned action was chosen.
    MenuOption { index: usize },
    /// An image render invocation failed.
    RenderFailed(RenderError),
    /// An image is on the canvas.
    ImageShown { label: String, size: PixelSize },
}

impl Notice {
    /// Logs the notice at a level matching its severity.
    pub fn log(&self) {
        match self {
            Notice::RenderFailed(err) => log::error!("[{}] {err}", err.kind()),
            Notice::MenuOption { .. } => log::info!("{self}"),
            Notice::ImageShown { .. } => log::info!("{self}"),
        }
    }

    /// Window title presenting this notice after the application name.
    pub fn window_title(&self, app: &str) -> String {
        format!("{app} - {self}")
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::MenuOption { .. } => f.write_str("menu option"),
            Notice::RenderFailed(err) => write!(f, "error: {err}"),
            Notice::ImageShown { label, size } => write!(f, "{label} ({size})"),
        }
    }
}

impl From<RenderError> for Notice {
    fn from(err: RenderError) -> Self {
        Notice::RenderFailed(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_option_is_generic() {
        let n = Notice::MenuOption { index: 7 };
        assert_eq!(n.to_string(), "menu option");
    }

    #[test]
    fn render_failure_carries_the_error() {
        let err = RenderError::ImageDecode {
            source_label: "cat.png".into(),
            reason: "bad header".into(),
        };
        let n = Notice::from(err.clone());
        assert_eq!(n, Notice::RenderFailed(err));
        assert!(n.window_title("vista").starts_with("vista - error: "));
    }

    #[test]
    fn image_shown_title() {
        let n = Notice::ImageShown {
            label: "red.png".into(),
            size: PixelSize::new(256, 256),
        };
        assert_eq!(n.window_title("vista"), "vista - red.png (256x256)");
    }
}
