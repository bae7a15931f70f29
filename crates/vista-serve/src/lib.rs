//! Static file server for the Vista demo site.
//!
//! Plain HTTP/1.1, `GET` and `HEAD` only, one request per connection.

pub mod files;
pub mod request;
pub mod response;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use http::{Method, StatusCode};
use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};

use crate::files::{content_type, resolve};
use crate::request::{HeadError, RequestLine, read_head};
use crate::response::Response;

pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Directory whose files are served; `/` maps to its `index.html`.
    pub root: PathBuf,
    pub addr: SocketAddr,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
        }
    }
}

/// A bound server, ready to accept connections.
pub struct Server {
    listener: TcpListener,
    root: Arc<PathBuf>,
}

impl Server {
    /// Binds the listener. The root must be an existing directory.
    pub async fn bind(config: &ServeConfig) -> Result<Self> {
        let root = tokio::fs::canonicalize(&config.root)
            .await
            .with_context(|| format!("site root {} not found", config.root.display()))?;

        let listener = TcpListener::bind(config.addr)
            .await
            .with_context(|| format!("failed to bind {}", config.addr))?;

        Ok(Self {
            listener,
            root: Arc::new(root),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("listener has no local address")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Accepts connections forever, one task per connection.
    pub async fn run(self) -> Result<()> {
        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    log::warn!("accept failed: {e}");
                    continue;
                }
            };

            let root = self.root.clone();
            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, &root).await {
                    log::debug!("{peer}: {e}");
                }
            });
        }
    }
}

async fn handle_connection(stream: TcpStream, root: &Path) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream);

    let (response, head_only) = match read_head(&mut reader).await {
        Ok(request) => {
            let head_only = request.method == Method::HEAD;
            let response = route(root, &request).await;
            log::info!("{} {} -> {}", request.method, request.target, response.status.as_u16());
            (response, head_only)
        }
        Err(HeadError::Empty) => return Ok(()),
        Err(HeadError::Malformed) => {
            log::info!("malformed request -> 400");
            (Response::status(StatusCode::BAD_REQUEST), false)
        }
    };

    response.write_to(reader.get_mut(), head_only).await
}

/// Produces the response for one request.
pub async fn route(root: &Path, request: &RequestLine) -> Response {
    if request.method != Method::GET && request.method != Method::HEAD {
        return Response::method_not_allowed();
    }

    let Some(path) = resolve(root, &request.target) else {
        return Response::status(StatusCode::NOT_FOUND);
    };

    // Symlinks may still point outside the root.
    let Ok(real) = tokio::fs::canonicalize(&path).await else {
        return Response::status(StatusCode::NOT_FOUND);
    };
    if !real.starts_with(root) {
        log::warn!("refusing {} outside the site root", real.display());
        return Response::status(StatusCode::NOT_FOUND);
    }

    match tokio::fs::metadata(&real).await {
        Ok(meta) if meta.is_file() => {}
        _ => return Response::status(StatusCode::NOT_FOUND),
    }

    match tokio::fs::read(&real).await {
        Ok(body) => Response::file(content_type(&real), body),
        Err(e) => {
            log::warn!("failed to read {}: {e}", real.display());
            Response::status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
