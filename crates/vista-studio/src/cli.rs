use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "vista",
    author,
    version,
    about = "Single-image GPU viewer with a responsive sidebar"
)]
pub struct Cli {
    /// Image to render on startup. More can be dropped onto the window.
    #[arg(value_name = "IMAGE")]
    pub image: Option<PathBuf>,

    /// Initial window width in logical pixels.
    #[arg(long, value_name = "PX", default_value_t = 1024.0)]
    pub width: f64,

    /// Initial window height in logical pixels.
    #[arg(long, value_name = "PX", default_value_t = 768.0)]
    pub height: f64,

    /// Log the vista crates at debug level (ignored when `RUST_LOG` is set).
    #[arg(short, long)]
    pub verbose: bool,
}
