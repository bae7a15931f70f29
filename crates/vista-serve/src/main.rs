use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use vista_serve::{DEFAULT_PORT, ServeConfig, Server};

#[derive(Parser, Debug)]
#[command(
    name = "vista-serve",
    author,
    version,
    about = "Serve the Vista demo site over HTTP"
)]
struct Cli {
    /// Directory to serve; `/` maps to its `index.html`.
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Port to listen on.
    #[arg(long, value_name = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Address to bind.
    #[arg(long, value_name = "ADDR", default_value = "127.0.0.1")]
    host: IpAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = ServeConfig {
        root: cli.root,
        addr: SocketAddr::new(cli.host, cli.port),
    };

    let server = Server::bind(&config).await?;
    log::info!(
        "serving {} at http://{}",
        server.root().display(),
        server.local_addr()?
    );

    server.run().await
}
