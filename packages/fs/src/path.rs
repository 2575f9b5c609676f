//! Path scheme shared by every [`Fs`](crate::Fs) implementation.
//!
//! Names are slash separated and unrooted: `css/app.css`, never `/css/app.css`.
//! Elements may not be empty, `.` or `..`. The single name `.` denotes the root.

/// The name of the root directory.
pub const ROOT: &str = ".";

/// Check that `name` is in the filesystem path scheme.
///
/// ```rust
/// use apidocs_fs::valid_path;
///
/// assert!(valid_path("index.html"));
/// assert!(valid_path("css/app.css"));
/// assert!(valid_path("."));
///
/// assert!(!valid_path("/index.html"));
/// assert!(!valid_path("css//app.css"));
/// assert!(!valid_path("../secret"));
/// assert!(!valid_path("css/"));
/// ```
pub fn valid_path(name: &str) -> bool {
    if name == ROOT {
        return true;
    }
    !name.is_empty()
        && name
            .split('/')
            .all(|elem| !elem.is_empty() && elem != "." && elem != "..")
}

/// Join a directory and a name, treating [`ROOT`] as the empty prefix.
pub fn join(dir: &str, name: &str) -> String {
    match (dir, name) {
        (ROOT, _) => name.to_string(),
        (_, ROOT) => dir.to_string(),
        _ => format!("{}/{}", dir, name),
    }
}

/// Last element of a valid name; the root is named `.`.
pub fn base_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Iterate over the ancestors of a valid name, nearest first, excluding the root.
pub(crate) fn ancestors(name: &str) -> impl Iterator<Item = &str> {
    name.char_indices()
        .rev()
        .filter(|(_, c)| *c == '/')
        .map(move |(i, _)| &name[..i])
}
