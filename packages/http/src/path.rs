//! URL path handling: decoding, cleaning, mapping onto filesystem names.

use percent_encoding::percent_decode_str;

/// Percent-decode a request path. `None` if the result is not UTF-8 or holds a NUL.
pub fn decode(raw: &str) -> Option<String> {
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;
    if decoded.contains('\0') {
        return None;
    }
    Some(decoded.into_owned())
}

/// Lexically clean an absolute URL path.
///
/// Duplicate slashes and `.` elements are dropped, `..` removes the previous
/// element and never climbs above `/`. The result has no trailing slash
/// unless it is `/`.
pub fn clean(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();
    for elem in path.split('/') {
        match elem {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            _ => stack.push(elem),
        }
    }
    format!("/{}", stack.join("/"))
}

/// Filesystem name for a cleaned URL path.
pub fn to_fs_name(cleaned: &str) -> &str {
    match cleaned.trim_start_matches('/') {
        "" => apidocs_fs::ROOT,
        name => name,
    }
}

/// Last element of a URL path, ignoring a trailing slash.
pub fn last_element(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
