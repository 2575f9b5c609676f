//! Error types for filesystem lookups.

/// Errors returned by [`Fs::open`](crate::Fs::open) and file handles.
///
/// Overlays and subtree views forward these unchanged, so a caller always sees
/// the error of the filesystem that actually answered the lookup.
#[derive(thiserror::Error, Debug)]
pub enum FsError {
    /// No entry exists at the path.
    #[error("open {path}: file does not exist")]
    NotFound { path: String },

    /// The path is not in the filesystem's path scheme.
    #[error("open {path}: invalid path")]
    InvalidPath { path: String },

    /// Underlying I/O failure while accessing an entry.
    #[error("{op} {path}: {source}")]
    Io {
        op: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    pub fn not_found(path: impl Into<String>) -> Self {
        FsError::NotFound { path: path.into() }
    }

    pub fn invalid_path(path: impl Into<String>) -> Self {
        FsError::InvalidPath { path: path.into() }
    }

    pub fn io(op: &'static str, path: impl Into<String>, source: std::io::Error) -> Self {
        FsError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// True for the existence-check failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound { .. })
    }

    /// The path the failed operation was given.
    pub fn path(&self) -> &str {
        match self {
            FsError::NotFound { path } | FsError::InvalidPath { path } | FsError::Io { path, .. } => {
                path
            }
        }
    }
}
