//! Core traits: Fs, File, and the metadata they report.

use std::io::{self, Read, Seek, SeekFrom};
use std::sync::Arc;
use std::time::SystemTime;

use crate::FsError;

/// Permission and type bits of an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FileMode(u32);

impl FileMode {
    /// Set on directories.
    pub const DIR: u32 = 0o040_000;

    /// Mask of the permission bits.
    pub const PERM: u32 = 0o777;

    pub const fn new(bits: u32) -> Self {
        FileMode(bits)
    }

    /// Read-only regular file.
    pub const fn read_only_file() -> Self {
        FileMode(0o444)
    }

    /// Read-only directory.
    pub const fn read_only_dir() -> Self {
        FileMode(Self::DIR | 0o555)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_dir(self) -> bool {
        self.0 & Self::DIR != 0
    }

    pub const fn permissions(self) -> u32 {
        self.0 & Self::PERM
    }
}

impl std::fmt::Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_dir() { 'd' } else { '-' };
        write!(f, "{}", kind)?;
        for shift in [6u32, 3, 0] {
            let bits = (self.0 >> shift) & 0o7;
            let r = if bits & 0o4 != 0 { 'r' } else { '-' };
            let w = if bits & 0o2 != 0 { 'w' } else { '-' };
            let x = if bits & 0o1 != 0 { 'x' } else { '-' };
            write!(f, "{}{}{}", r, w, x)?;
        }
        Ok(())
    }
}

/// Metadata of an entry, as returned by [`File::stat`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileInfo {
    name: String,
    size: u64,
    mode: FileMode,
    modified: Option<SystemTime>,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, size: u64, mode: FileMode) -> Self {
        Self {
            name: name.into(),
            size,
            mode,
            modified: None,
        }
    }

    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Same metadata with a different size.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Base name of the entry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length in bytes; zero for directories.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    /// Modification time, when the backing store records one.
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    pub fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }
}

/// An open, readable entry.
///
/// Handles are independent: reading or seeking one never moves another handle
/// to the same entry. Dropping a handle closes it.
pub trait File: Read + Seek + Send {
    /// Metadata of the opened entry.
    fn stat(&self) -> Result<FileInfo, FsError>;
}

/// A read-only hierarchical filesystem.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Fs>`.
pub trait Fs: Send + Sync {
    /// Open the entry at `name` (see [`valid_path`](crate::valid_path)).
    ///
    /// # Returns
    ///
    /// * `Ok(handle)` - A fresh handle positioned at the start.
    /// * `Err(FsError::NotFound)` - Nothing exists at `name`.
    /// * `Err(FsError::InvalidPath)` - `name` is not in the path scheme.
    fn open(&self, name: &str) -> Result<Box<dyn File>, FsError>;
}

// Blanket implementations for references and smart pointers

impl<T: Fs + ?Sized> Fs for &T {
    fn open(&self, name: &str) -> Result<Box<dyn File>, FsError> {
        (**self).open(name)
    }
}

impl<T: Fs + ?Sized> Fs for Box<T> {
    fn open(&self, name: &str) -> Result<Box<dyn File>, FsError> {
        self.as_ref().open(name)
    }
}

impl<T: Fs + ?Sized> Fs for Arc<T> {
    fn open(&self, name: &str) -> Result<Box<dyn File>, FsError> {
        self.as_ref().open(name)
    }
}

/// Read the whole content of the file at `name`.
pub fn read_file(fs: &dyn Fs, name: &str) -> Result<Vec<u8>, FsError> {
    let mut file = fs.open(name)?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)
        .map_err(|e| FsError::io("read", name, e))?;
    Ok(buf)
}

/// Metadata of the entry at `name`.
pub fn stat(fs: &dyn Fs, name: &str) -> Result<FileInfo, FsError> {
    fs.open(name)?.stat()
}

/// Handle returned when a directory is opened. Reads fail; stat succeeds.
pub(crate) struct DirHandle {
    info: FileInfo,
}

impl DirHandle {
    pub(crate) fn new(info: FileInfo) -> Self {
        Self { info }
    }
}

impl Read for DirHandle {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Other,
            format!("{}: is a directory", self.info.name()),
        ))
    }
}

impl Seek for DirHandle {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Ok(0)
    }
}

impl File for DirHandle {
    fn stat(&self) -> Result<FileInfo, FsError> {
        Ok(self.info.clone())
    }
}
