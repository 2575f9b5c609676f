//! Read-only filesystem capability for serving static assets.
//!
//! - `Fs`: open a path, get an independent `File` handle
//! - `File`: `Read + Seek` plus `stat()` metadata (`FileInfo`)
//! - `MemFs`: in-memory tree, handy as a stand-in for bundled assets
//! - `EmbeddedFs`: tree compiled into the binary with `include_dir`
//! - `SubFs`: subdirectory as a root
//! - `OverlayFs`: replace the content of chosen files, delegate the rest
//!
//! # Example
//!
//! ```rust
//! use apidocs_fs::{read_file, stat, MemFs, OverlayFs, ReplacementEntry};
//!
//! let base = MemFs::new().with_file("index.html", "{{.SwaggerURL}}").unwrap();
//! let original = stat(&base, "index.html").unwrap();
//! let fs = OverlayFs::new(base).with_replacement(
//!     "index.html",
//!     ReplacementEntry::new(original, "https://example.com/openapi.json"),
//! );
//!
//! assert_eq!(stat(&fs, "index.html").unwrap().size(), 32);
//! assert_eq!(read_file(&fs, "index.html").unwrap(), b"https://example.com/openapi.json");
//! ```

pub use bytes::Bytes;

mod error;
mod mem;
mod overlay;
mod path;
mod sub;
mod traits;

#[cfg(feature = "embedded")]
mod embedded;

pub use error::FsError;
pub use mem::MemFs;
pub use overlay::{OverlayFile, OverlayFs, ReplacementEntry};
pub use path::{base_name, join, valid_path, ROOT};
pub use sub::SubFs;
pub use traits::{read_file, stat, File, FileInfo, FileMode, Fs};

#[cfg(feature = "embedded")]
pub use embedded::EmbeddedFs;
