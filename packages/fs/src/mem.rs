//! In-memory filesystem.

use std::collections::BTreeMap;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::time::SystemTime;

use bytes::Bytes;

use crate::path::{ancestors, base_name, valid_path, ROOT};
use crate::traits::DirHandle;
use crate::{File, FileInfo, FileMode, Fs, FsError};

struct MemEntry {
    content: Bytes,
    mode: FileMode,
    modified: Option<SystemTime>,
}

/// A read-only filesystem held entirely in memory.
///
/// Directories are implicit: any prefix of a file path is a directory.
///
/// # Example
///
/// ```rust
/// use apidocs_fs::{read_file, MemFs};
///
/// let fs = MemFs::new()
///     .with_file("index.html", "<html></html>")
///     .unwrap()
///     .with_file("css/app.css", "body {}")
///     .unwrap();
///
/// assert_eq!(read_file(&fs, "css/app.css").unwrap(), b"body {}");
/// ```
#[derive(Default)]
pub struct MemFs {
    files: BTreeMap<String, MemEntry>,
}

impl MemFs {
    /// Create an empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a read-only file.
    pub fn with_file(mut self, path: &str, content: impl Into<Bytes>) -> Result<Self, FsError> {
        self.insert(path, content, FileMode::read_only_file(), None)?;
        Ok(self)
    }

    /// Add a file with explicit mode and modification time.
    pub fn with_file_info(
        mut self,
        path: &str,
        content: impl Into<Bytes>,
        mode: FileMode,
        modified: Option<SystemTime>,
    ) -> Result<Self, FsError> {
        self.insert(path, content, mode, modified)?;
        Ok(self)
    }

    /// Add or replace a file.
    ///
    /// Fails when `path` is invalid or when it would turn an existing file
    /// into a directory (or the reverse).
    pub fn insert(
        &mut self,
        path: &str,
        content: impl Into<Bytes>,
        mode: FileMode,
        modified: Option<SystemTime>,
    ) -> Result<(), FsError> {
        if path == ROOT || !valid_path(path) || mode.is_dir() {
            return Err(FsError::invalid_path(path));
        }
        if ancestors(path).any(|dir| self.files.contains_key(dir)) || self.is_dir(path) {
            return Err(FsError::invalid_path(path));
        }
        self.files.insert(
            path.to_string(),
            MemEntry {
                content: content.into(),
                mode,
                modified,
            },
        );
        Ok(())
    }

    /// Number of files (directories are not counted).
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over file paths in lexical order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    fn is_dir(&self, name: &str) -> bool {
        if name == ROOT {
            return true;
        }
        let prefix = format!("{}/", name);
        self.files
            .range(prefix.clone()..)
            .next()
            .is_some_and(|(k, _)| k.starts_with(&prefix))
    }
}

/// Handle over a file of a [`MemFs`]. Shares the immutable bytes, owns the cursor.
struct MemFile {
    info: FileInfo,
    cursor: Cursor<Bytes>,
}

impl Read for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Seek for MemFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl File for MemFile {
    fn stat(&self) -> Result<FileInfo, FsError> {
        Ok(self.info.clone())
    }
}

impl Fs for MemFs {
    fn open(&self, name: &str) -> Result<Box<dyn File>, FsError> {
        if !valid_path(name) {
            return Err(FsError::invalid_path(name));
        }
        if let Some(entry) = self.files.get(name) {
            let mut info = FileInfo::new(base_name(name), entry.content.len() as u64, entry.mode);
            if let Some(modified) = entry.modified {
                info = info.with_modified(modified);
            }
            return Ok(Box::new(MemFile {
                info,
                cursor: Cursor::new(entry.content.clone()),
            }));
        }
        if self.is_dir(name) {
            let info = FileInfo::new(base_name(name), 0, FileMode::read_only_dir());
            return Ok(Box::new(DirHandle::new(info)));
        }
        Err(FsError::not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{read_file, stat};

    fn sample() -> MemFs {
        MemFs::new()
            .with_file("index.html", "<html></html>")
            .unwrap()
            .with_file("css/app.css", "body {}")
            .unwrap()
            .with_file("css/vendor/reset.css", "* {}")
            .unwrap()
    }

    #[test]
    fn reads_files() {
        let fs = sample();
        assert_eq!(read_file(&fs, "index.html").unwrap(), b"<html></html>");
        assert_eq!(read_file(&fs, "css/vendor/reset.css").unwrap(), b"* {}");
    }

    #[test]
    fn stat_reports_size_and_name() {
        let fs = sample();
        let info = stat(&fs, "css/app.css").unwrap();
        assert_eq!(info.name(), "app.css");
        assert_eq!(info.size(), 7);
        assert_eq!(info.mode(), FileMode::read_only_file());
        assert!(info.modified().is_none());
    }

    #[test]
    fn implicit_directories() {
        let fs = sample();
        assert!(stat(&fs, "css").unwrap().is_dir());
        assert!(stat(&fs, "css/vendor").unwrap().is_dir());
        assert!(stat(&fs, ".").unwrap().is_dir());
        assert!(stat(&fs, "cs").unwrap_err().is_not_found());
    }

    #[test]
    fn missing_and_invalid() {
        let fs = sample();
        assert!(fs.open("missing.js").err().unwrap().is_not_found());
        assert!(matches!(
            fs.open("/index.html"),
            Err(FsError::InvalidPath { .. })
        ));
    }

    #[test]
    fn rejects_file_dir_conflicts() {
        let mut fs = sample();
        let mode = FileMode::read_only_file();
        assert!(fs.insert("css", "x", mode, None).is_err());
        assert!(fs.insert("index.html/inner", "x", mode, None).is_err());
        assert!(fs.insert("css/new.css", "x", mode, None).is_ok());
        assert_eq!(fs.len(), 4);
    }

    #[test]
    fn keeps_modified_time() {
        let t = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(42);
        let fs = MemFs::new()
            .with_file_info("a.txt", "a", FileMode::new(0o644), Some(t))
            .unwrap();
        let info = stat(&fs, "a.txt").unwrap();
        assert_eq!(info.modified(), Some(t));
        assert_eq!(info.mode().permissions(), 0o644);
    }
}
