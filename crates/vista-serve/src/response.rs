use http::{StatusCode, header};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// A complete response; the body is buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    pub allow: Option<&'static str>,
}

impl Response {
    pub fn file(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type,
            body,
            allow: None,
        }
    }

    /// Short plain-text response carrying the status reason as body.
    pub fn status(status: StatusCode) -> Self {
        let reason = status.canonical_reason().unwrap_or("Unknown");
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: format!("{} {reason}\n", status.as_u16()).into_bytes(),
            allow: None,
        }
    }

    pub fn method_not_allowed() -> Self {
        Self {
            allow: Some("GET, HEAD"),
            ..Self::status(StatusCode::METHOD_NOT_ALLOWED)
        }
    }

    /// Serializes the head, then the body unless `head_only`.
    pub async fn write_to<W>(&self, writer: &mut W, head_only: bool) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let reason = self.status.canonical_reason().unwrap_or("Unknown");
        let mut head = format!(
            "HTTP/1.1 {} {reason}\r\n{}: {}\r\n{}: {}\r\n{}: close\r\n",
            self.status.as_u16(),
            header::CONTENT_TYPE,
            self.content_type,
            header::CONTENT_LENGTH,
            self.body.len(),
            header::CONNECTION,
        );
        if let Some(allow) = self.allow {
            head.push_str(&format!("{}: {allow}\r\n", header::ALLOW));
        }
        head.push_str("\r\n");

        writer.write_all(head.as_bytes()).await?;
        if !head_only {
            writer.write_all(&self.body).await?;
        }
        writer.flush().await
    }
}
