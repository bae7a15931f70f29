use http::Method;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Upper bound for the request head (request line plus headers).
pub const MAX_HEAD_BYTES: usize = 8 * 1024;

/// The parts of a request line the server cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    pub target: String,
}

/// Why a request head could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadError {
    /// The peer closed the connection before sending anything.
    Empty,
    /// Not an HTTP/1.x request line, or the head is too large.
    Malformed,
}

/// Parses `METHOD SP target SP HTTP/1.x`.
pub fn parse_request_line(line: &str) -> Result<RequestLine, HeadError> {
    let mut parts = line.trim_end_matches(['\r', '\n']).split(' ');

    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(HeadError::Malformed);
    };

    if !matches!(version, "HTTP/1.0" | "HTTP/1.1") || !target.starts_with('/') {
        return Err(HeadError::Malformed);
    }
    let method = Method::from_bytes(method.as_bytes()).map_err(|_| HeadError::Malformed)?;

    Ok(RequestLine {
        method,
        target: target.to_string(),
    })
}

/// Reads the request head and returns its request line. Headers are skipped.
///
/// At most `MAX_HEAD_BYTES + 1` bytes are taken from `reader`; a head that
/// reaches that many bytes is `Malformed`, whatever its line lengths.
pub async fn read_head<R>(reader: &mut R) -> Result<RequestLine, HeadError>
where
    R: AsyncBufRead + Unpin,
{
    let mut head = (&mut *reader).take(MAX_HEAD_BYTES as u64 + 1);
    let mut line = String::new();
    let mut total = 0;

    let n = head
        .read_line(&mut line)
        .await
        .map_err(|_| HeadError::Malformed)?;
    if n == 0 {
        return Err(HeadError::Empty);
    }
    total += n;
    if total > MAX_HEAD_BYTES {
        return Err(HeadError::Malformed);
    }
    let request = parse_request_line(&line)?;

    loop {
        line.clear();
        let n = head
            .read_line(&mut line)
            .await
            .map_err(|_| HeadError::Malformed)?;
        total += n;
        if total > MAX_HEAD_BYTES {
            return Err(HeadError::Malformed);
        }
        if n == 0 || line == "\r\n" || line == "\n" {
            break;
        }
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_get() {
        let r = parse_request_line("GET /index.html HTTP/1.1\r\n").unwrap();
        assert_eq!(r.method, Method::GET);
        assert_eq!(r.target, "/index.html");
    }

    #[test]
    fn rejects_garbage() {
        for line in ["", "GET", "GET /", "GET / HTTP/2", "GET index.html HTTP/1.1", "GET / HTTP/1.1 extra"] {
            assert_eq!(parse_request_line(line), Err(HeadError::Malformed), "{line:?}");
        }
    }

    #[test]
    fn keeps_unknown_methods_for_405() {
        let r = parse_request_line("PURGE / HTTP/1.1").unwrap();
        assert_eq!(r.method.as_str(), "PURGE");
    }

    #[tokio::test]
    async fn reads_head_and_skips_headers() {
        let raw: &[u8] = b"HEAD /a.css HTTP/1.1\r\nHost: x\r\nAccept: */*\r\n\r\nbody";
        let mut reader = tokio::io::BufReader::new(raw);
        let r = read_head(&mut reader).await.unwrap();
        assert_eq!(r.method, Method::HEAD);
        assert_eq!(r.target, "/a.css");
    }

    #[tokio::test]
    async fn empty_connection() {
        let raw: &[u8] = b"";
        let mut reader = tokio::io::BufReader::new(raw);
        assert_eq!(read_head(&mut reader).await, Err(HeadError::Empty));
    }

    #[tokio::test]
    async fn oversized_header_stops_at_limit() {
        let mut raw = b"GET / HTTP/1.1\r\nX-Big: ".to_vec();
        raw.extend(std::iter::repeat(b'a').take(1024 * 1024));
        raw.extend_from_slice(b"\r\n\r\nMARK");

        let mut reader = tokio::io::BufReader::new(&raw[..]);
        assert_eq!(read_head(&mut reader).await, Err(HeadError::Malformed));

        let unread = reader.get_ref().len() + reader.buffer().len();
        assert!(raw.len() - unread <= MAX_HEAD_BYTES + 1);
    }

    #[tokio::test]
    async fn oversized_request_line_is_malformed() {
        let mut raw = b"GET /".to_vec();
        raw.extend(std::iter::repeat(b'a').take(2 * MAX_HEAD_BYTES));
        raw.extend_from_slice(b" HTTP/1.1\r\n\r\n");

        let mut reader = tokio::io::BufReader::new(&raw[..]);
        assert_eq!(read_head(&mut reader).await, Err(HeadError::Malformed));
    }

    #[tokio::test]
    async fn head_just_under_limit_is_accepted() {
        let mut raw = b"GET / HTTP/1.1\r\nX-Pad: ".to_vec();
        let pad = MAX_HEAD_BYTES - raw.len() - 4;
        raw.extend(std::iter::repeat(b'a').take(pad));
        raw.extend_from_slice(b"\r\n\r\n");
        assert_eq!(raw.len(), MAX_HEAD_BYTES);

        let mut reader = tokio::io::BufReader::new(&raw[..]);
        assert_eq!(read_head(&mut reader).await.unwrap().target, "/");
    }
}
