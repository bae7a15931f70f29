mod cli;
mod viewer;

use anyhow::Result;
use clap::Parser;

use vista_engine::device::GpuInit;
use vista_engine::imaging::ImageSource;
use vista_engine::logging::{LoggingConfig, init_logging};
use vista_engine::window::{Runtime, RuntimeConfig};

use crate::cli::Cli;
use crate::viewer::Viewer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = if cli.verbose && std::env::var_os("RUST_LOG").is_none() {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::default()
    };
    init_logging(logging);

    let viewer = Viewer::new(viewer::APP_NAME, cli.image.map(ImageSource::Path));
    let config = RuntimeConfig::new(viewer::APP_NAME, cli.width, cli.height);

    Runtime::run(config, GpuInit::default(), viewer)
}
