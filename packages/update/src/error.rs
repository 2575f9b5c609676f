//! Error types for the asset refresh.

use std::path::PathBuf;

use apidocs_ui::BuildError;

/// Errors from an asset refresh.
///
/// Each variant names the step and target that failed. Any error before the
/// final swap leaves the existing asset tree as it was.
#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error("couldn't read {}: {source}", path.display())]
    ReadVersion {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't set up HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("couldn't {op} {url}: {source}")]
    Request {
        op: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("couldn't {op} {url}: {status}")]
    Status {
        op: &'static str,
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("error decoding release list from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no suitable releases")]
    NoStableRelease,

    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("tar parsing error: {0}")]
    Archive(#[source] std::io::Error),

    #[error("archive entry {path} escapes the destination")]
    UnsafeEntry { path: String },

    #[error("archive has no dist directory")]
    EmptyDist,

    #[error("expected exactly one {anchor} in {}, found {found}", path.display())]
    Anchor {
        path: PathBuf,
        anchor: String,
        found: usize,
    },

    #[error("rewritten entry page is unusable: {0}")]
    EntryPage(#[from] BuildError),

    #[error("couldn't {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl UpdateError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        UpdateError::Io {
            op,
            path: path.into(),
            source,
        }
    }
}
