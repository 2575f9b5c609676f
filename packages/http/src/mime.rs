//! Content-Type selection for served files.

/// Content type for a file name, by extension.
pub fn by_extension(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" | "map" => "application/json",
        "yaml" | "yml" => "application/yaml",
        "xml" => "text/xml; charset=utf-8",
        "txt" | "md" => "text/plain; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "wasm" => "application/wasm",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(mime)
}

/// Guess a content type from the first bytes of a body.
pub fn sniff(body: &[u8]) -> &'static str {
    let head = &body[..body.len().min(512)];
    let trimmed = match head.iter().position(|b| !b.is_ascii_whitespace()) {
        Some(start) => &head[start..],
        None => head,
    };

    let lower: Vec<u8> = trimmed
        .iter()
        .take(14)
        .map(|b| b.to_ascii_lowercase())
        .collect();
    if lower.starts_with(b"<!doctype html") || lower.starts_with(b"<html") {
        return "text/html; charset=utf-8";
    }

    // A multi-byte character may be cut at the sniff boundary.
    let text = match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    };
    let binary = head
        .iter()
        .any(|b| matches!(b, 0x00..=0x08 | 0x0b | 0x0e..=0x1a | 0x1c..=0x1f));

    if text && !binary {
        "text/plain; charset=utf-8"
    } else {
        "application/octet-stream"
    }
}

/// Content type for a named file with the given body.
pub fn content_type(name: &str, body: &[u8]) -> &'static str {
    by_extension(name).unwrap_or_else(|| sniff(body))
}
