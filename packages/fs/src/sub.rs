//! SubFs: view a subdirectory of another filesystem as its root.

use crate::path::{join, valid_path};
use crate::{File, Fs, FsError};

/// Views a subtree of a filesystem.
///
/// `SubFs::new(inner, "dist").open("index.html")` opens `dist/index.html` in
/// `inner`. Errors from the inner filesystem are returned as-is.
pub struct SubFs<F> {
    inner: F,
    dir: String,
}

impl<F: Fs> SubFs<F> {
    /// Root a view at `dir` inside `inner`.
    ///
    /// Only the name is checked here; a missing directory surfaces on the
    /// first open.
    pub fn new(inner: F, dir: &str) -> Result<Self, FsError> {
        if !valid_path(dir) {
            return Err(FsError::invalid_path(dir));
        }
        Ok(Self {
            inner,
            dir: dir.to_string(),
        })
    }

    /// The directory this view is rooted at.
    pub fn dir(&self) -> &str {
        &self.dir
    }

    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F: Fs> Fs for SubFs<F> {
    fn open(&self, name: &str) -> Result<Box<dyn File>, FsError> {
        if !valid_path(name) {
            return Err(FsError::invalid_path(name));
        }
        self.inner.open(&join(&self.dir, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{read_file, stat, MemFs};

    fn tree() -> MemFs {
        MemFs::new()
            .with_file("embed/index.html", "<html></html>")
            .unwrap()
            .with_file("embed/css/app.css", "body {}")
            .unwrap()
            .with_file("generate.txt", "outside")
            .unwrap()
    }

    #[test]
    fn opens_relative_to_dir() {
        let sub = SubFs::new(tree(), "embed").unwrap();
        assert_eq!(read_file(&sub, "index.html").unwrap(), b"<html></html>");
        assert_eq!(read_file(&sub, "css/app.css").unwrap(), b"body {}");
        assert!(stat(&sub, ".").unwrap().is_dir());
    }

    #[test]
    fn cannot_escape() {
        let sub = SubFs::new(tree(), "embed").unwrap();
        assert!(matches!(
            sub.open("../generate.txt"),
            Err(FsError::InvalidPath { .. })
        ));
        assert!(sub.open("generate.txt").err().unwrap().is_not_found());
    }

    #[test]
    fn rejects_bad_dir() {
        assert!(SubFs::new(tree(), "/embed").is_err());
        assert!(SubFs::new(tree(), ".").is_ok());
    }
}
