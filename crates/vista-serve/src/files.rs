use std::path::{Path, PathBuf};

/// File served for directory targets.
pub const INDEX_FILE: &str = "index.html";

/// Maps a request target onto a path under `root`.
///
/// The query and fragment are ignored and `%XX` escapes are decoded. Returns
/// `None` for anything that would leave the root: `..` segments, backslashes,
/// NUL bytes or invalid escapes. Targets ending in `/` resolve to the index file.
pub fn resolve(root: &Path, target: &str) -> Option<PathBuf> {
    let path = target.split(['?', '#']).next().unwrap_or("");
    let decoded = percent_decode(path)?;

    if decoded.contains('\\') || decoded.contains('\0') {
        return None;
    }

    let mut out = root.to_path_buf();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            s => out.push(s),
        }
    }

    if decoded.is_empty() || decoded.ends_with('/') {
        out.push(INDEX_FILE);
    }
    Some(out)
}

fn percent_decode(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            let hex = std::str::from_utf8(hex).ok()?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).ok()
}

/// Content type derived from the file extension.
pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("wgsl") => "text/wgsl; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("ico") => "image/x-icon",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("/srv/site")
    }

    #[test]
    fn slash_is_index() {
        assert_eq!(resolve(&root(), "/"), Some(root().join("index.html")));
        assert_eq!(resolve(&root(), "/img/"), Some(root().join("img").join("index.html")));
    }

    #[test]
    fn plain_file_with_query() {
        assert_eq!(
            resolve(&root(), "/app.js?v=3#top"),
            Some(root().join("app.js"))
        );
    }

    #[test]
    fn escapes_are_decoded() {
        assert_eq!(
            resolve(&root(), "/my%20photo.png"),
            Some(root().join("my photo.png"))
        );
    }

    #[test]
    fn traversal_is_rejected() {
        for t in ["/../etc/passwd", "/img/../../x", "/%2e%2e/secret", "/a%5c..%5cb", "/a%00", "/%zz"] {
            assert_eq!(resolve(&root(), t), None, "{t}");
        }
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(content_type(Path::new("cat.PNG")), "image/png");
        assert_eq!(content_type(Path::new("blob")), "application/octet-stream");
    }
}
