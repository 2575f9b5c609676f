//! Extraction of the `dist/` directory from a release tarball.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tar::{Archive, EntryType};

use crate::error::UpdateError;

/// Directory inside the release tree that holds the static assets.
pub const DIST_DIR: &str = "dist";

/// Source maps are left out of the bundle.
const SKIPPED_EXTENSION: &str = "map";

/// Extract every regular file under `<top>/dist/` of a `.tar.gz` into `dest`,
/// except source maps.
///
/// Returns the number of files written. Fails if an entry would land outside
/// `dest` or if the archive has no such files.
pub fn extract_dist(archive: &[u8], dest: &Path) -> Result<usize, UpdateError> {
    let mut tar = Archive::new(GzDecoder::new(archive));
    let mut written = 0;

    for entry in tar.entries().map_err(UpdateError::Archive)? {
        let mut entry = entry.map_err(UpdateError::Archive)?;
        if entry.header().entry_type() != EntryType::Regular {
            continue;
        }

        let path = entry.path().map_err(UpdateError::Archive)?.into_owned();
        let Some(relative) = dist_relative(&path)? else {
            continue;
        };
        if relative.extension().is_some_and(|ext| ext == SKIPPED_EXTENSION) {
            continue;
        }

        let target = dest.join(&relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| UpdateError::io("create", parent, e))?;
        }
        let mut out = File::create(&target).map_err(|e| UpdateError::io("extract", &target, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| UpdateError::io("extract", &target, e))?;

        tracing::trace!(file = %relative.display(), "extracted");
        written += 1;
    }

    if written == 0 {
        return Err(UpdateError::EmptyDist);
    }
    Ok(written)
}

/// Path below `<top>/dist/`, or `None` for entries elsewhere in the tree.
fn dist_relative(path: &Path) -> Result<Option<PathBuf>, UpdateError> {
    let unsafe_entry = || UpdateError::UnsafeEntry {
        path: path.display().to_string(),
    };

    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::CurDir => {}
            _ => return Err(unsafe_entry()),
        }
    }

    match parts.as_slice() {
        [_top, dist, rest @ ..] if *dist == DIST_DIR && !rest.is_empty() => {
            Ok(Some(rest.iter().collect()))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;

    fn tarball(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
        for (path, data) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_entry_type(EntryType::Regular);
            header.set_cksum();
            builder.append_data(&mut header, path, *data).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn extracts_only_dist() {
        let archive = tarball(&[
            ("swagger-ui-4.5.0/README.md", b"readme"),
            ("swagger-ui-4.5.0/dist/index.html", b"<html>"),
            ("swagger-ui-4.5.0/dist/nested/deep.js", b"deep"),
            ("swagger-ui-4.5.0/dist/swagger-ui.js.map", b"{}"),
            ("swagger-ui-4.5.0/distribution/other.js", b"no"),
            ("swagger-ui-4.5.0/src/dist/inner.js", b"no"),
        ]);
        let dir = tempfile::tempdir().unwrap();

        let n = extract_dist(&archive, dir.path()).unwrap();
        assert_eq!(n, 2);
        assert_eq!(fs::read(dir.path().join("index.html")).unwrap(), b"<html>");
        assert_eq!(fs::read(dir.path().join("nested/deep.js")).unwrap(), b"deep");
        assert!(!dir.path().join("swagger-ui.js.map").exists());
        assert!(!dir.path().join("README.md").exists());
        assert!(!dir.path().join("other.js").exists());
        assert!(!dir.path().join("inner.js").exists());
    }

    #[test]
    fn no_dist_is_an_error() {
        let archive = tarball(&[("swagger-ui-4.5.0/README.md", b"readme")]);
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            extract_dist(&archive, dir.path()),
            Err(UpdateError::EmptyDist)
        ));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            extract_dist(b"definitely not gzip", dir.path()),
            Err(UpdateError::Archive(_))
        ));
    }

    #[test]
    fn parent_components_are_rejected() {
        assert!(matches!(
            dist_relative(Path::new("top/dist/../../etc/passwd")),
            Err(UpdateError::UnsafeEntry { .. })
        ));
        assert!(matches!(
            dist_relative(Path::new("/top/dist/x")),
            Err(UpdateError::UnsafeEntry { .. })
        ));
    }

    #[test]
    fn relative_paths() {
        assert_eq!(
            dist_relative(Path::new("top/dist/a/b.css")).unwrap(),
            Some(PathBuf::from("a/b.css"))
        );
        assert_eq!(dist_relative(Path::new("top/dist")).unwrap(), None);
        assert_eq!(dist_relative(Path::new("top/src/a.js")).unwrap(), None);
    }
}
