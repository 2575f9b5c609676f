//! Filesystem over a directory tree compiled into the binary with `include_dir`.

use std::io::{self, Cursor, Read, Seek, SeekFrom};

use include_dir::{Dir, DirEntry};

use crate::path::{base_name, valid_path, ROOT};
use crate::traits::DirHandle;
use crate::{File, FileInfo, FileMode, Fs, FsError};

/// Read-only view of an embedded [`Dir`].
///
/// Embedded entries carry no modification time, so `stat` reports `None` and
/// file servers leave out `Last-Modified`.
#[derive(Clone, Copy)]
pub struct EmbeddedFs {
    root: &'static Dir<'static>,
}

impl EmbeddedFs {
    pub const fn new(root: &'static Dir<'static>) -> Self {
        Self { root }
    }
}

struct EmbeddedFile {
    info: FileInfo,
    cursor: Cursor<&'static [u8]>,
}

impl Read for EmbeddedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Seek for EmbeddedFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl File for EmbeddedFile {
    fn stat(&self) -> Result<FileInfo, FsError> {
        Ok(self.info.clone())
    }
}

impl Fs for EmbeddedFs {
    fn open(&self, name: &str) -> Result<Box<dyn File>, FsError> {
        if !valid_path(name) {
            return Err(FsError::invalid_path(name));
        }
        if name == ROOT {
            let info = FileInfo::new(ROOT, 0, FileMode::read_only_dir());
            return Ok(Box::new(DirHandle::new(info)));
        }

        match self.root.get_entry(name) {
            Some(DirEntry::File(file)) => {
                let contents: &'static [u8] = file.contents();
                let info = FileInfo::new(
                    base_name(name),
                    contents.len() as u64,
                    FileMode::read_only_file(),
                );
                Ok(Box::new(EmbeddedFile {
                    info,
                    cursor: Cursor::new(contents),
                }))
            }
            Some(DirEntry::Dir(_)) => {
                let info = FileInfo::new(base_name(name), 0, FileMode::read_only_dir());
                Ok(Box::new(DirHandle::new(info)))
            }
            None => Err(FsError::not_found(name)),
        }
    }
}
