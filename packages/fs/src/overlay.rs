//! OverlayFs: substitute the content of selected files of a base filesystem.
//!
//! Every name that has a replacement is served from memory with the original
//! file's metadata and the replacement's size. All other names go straight to
//! the base, errors included.

use std::collections::HashMap;
use std::io::{self, Cursor, Read, Seek, SeekFrom};

use bytes::Bytes;

use crate::{File, FileInfo, Fs, FsError};

/// What an overlay serves in place of one file.
///
/// Name, mode and modification time come from `info`; the size reported to
/// callers is always the length of `content`.
#[derive(Clone, Debug)]
pub struct ReplacementEntry {
    info: FileInfo,
    content: Bytes,
}

impl ReplacementEntry {
    /// Replace the file described by `original` with `content`.
    pub fn new(original: FileInfo, content: impl Into<Bytes>) -> Self {
        Self {
            info: original,
            content: content.into(),
        }
    }

    /// Metadata as callers will see it.
    pub fn info(&self) -> FileInfo {
        self.info.clone().with_size(self.content.len() as u64)
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

/// A read-only filesystem that serves replacement content for some names and
/// delegates every other open to a base filesystem.
///
/// The replacement set is fixed once the overlay is built, so concurrent opens
/// need no locking. Each open of a replaced name gets its own read position.
///
/// # Example
///
/// ```rust
/// use apidocs_fs::{read_file, stat, Fs, MemFs, OverlayFs, ReplacementEntry};
///
/// let base = MemFs::new()
///     .with_file("index.html", "old")
///     .unwrap()
///     .with_file("app.js", "js")
///     .unwrap();
///
/// let original = stat(&base, "index.html").unwrap();
/// let overlay = OverlayFs::new(base)
///     .with_replacement("index.html", ReplacementEntry::new(original, "brand new"));
///
/// assert_eq!(read_file(&overlay, "index.html").unwrap(), b"brand new");
/// assert_eq!(stat(&overlay, "index.html").unwrap().size(), 9);
/// assert_eq!(read_file(&overlay, "app.js").unwrap(), b"js");
/// ```
pub struct OverlayFs<F> {
    base: F,
    replaced: HashMap<String, ReplacementEntry>,
}

impl<F: Fs> OverlayFs<F> {
    /// Wrap `base` with no replacements.
    pub fn new(base: F) -> Self {
        Self {
            base,
            replaced: HashMap::new(),
        }
    }

    /// Wrap `base` with a ready-made replacement set.
    pub fn from_replacements(base: F, replaced: HashMap<String, ReplacementEntry>) -> Self {
        Self { base, replaced }
    }

    /// Serve `entry` for `path`, replacing any earlier entry for it.
    pub fn with_replacement(mut self, path: impl Into<String>, entry: ReplacementEntry) -> Self {
        self.replaced.insert(path.into(), entry);
        self
    }

    /// True if opens of `path` are answered by the overlay.
    pub fn is_replaced(&self, path: &str) -> bool {
        self.replaced.contains_key(path)
    }

    /// Paths with a replacement, in no particular order.
    pub fn replaced_paths(&self) -> impl Iterator<Item = &str> {
        self.replaced.keys().map(String::as_str)
    }

    pub fn base(&self) -> &F {
        &self.base
    }
}

impl<F: Fs> Fs for OverlayFs<F> {
    fn open(&self, name: &str) -> Result<Box<dyn File>, FsError> {
        match self.replaced.get(name) {
            Some(entry) => {
                tracing::trace!(path = name, size = entry.content.len(), "open overlaid file");
                Ok(Box::new(OverlayFile::new(entry)))
            }
            None => self.base.open(name),
        }
    }
}

/// An open replaced file.
///
/// Owns its cursor; the bytes behind it are immutable and shared.
pub struct OverlayFile {
    info: FileInfo,
    cursor: Cursor<Bytes>,
}

impl OverlayFile {
    fn new(entry: &ReplacementEntry) -> Self {
        Self {
            info: entry.info.clone(),
            cursor: Cursor::new(entry.content.clone()),
        }
    }
}

impl Read for OverlayFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Seek for OverlayFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl File for OverlayFile {
    fn stat(&self) -> Result<FileInfo, FsError> {
        Ok(self
            .info
            .clone()
            .with_size(self.cursor.get_ref().len() as u64))
    }
}
