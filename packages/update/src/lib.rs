//! Refresh the Swagger UI assets bundled into `apidocs-ui`.
//!
//! The tool looks up the latest stable upstream release, downloads its source
//! archive and replaces the embed directory with the archive's `dist/` tree,
//! turning the hard-coded petstore URL in `index.html` into the
//! `{{.SwaggerURL}}` template action. Releases that configure the UI in
//! `swagger-initializer.js` have that script inlined into `index.html` first.
//! Nothing on disk changes until every step before the final swap has
//! succeeded; the version file is renamed into place right after it.

pub mod archive;
pub mod config;
pub mod error;
pub mod release;
pub mod rewrite;

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use apidocs_ui::ENTRY_PAGE;

pub use config::Config;
pub use error::UpdateError;
pub use release::{latest_stable, Release, ReleaseClient, Version};

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    UpToDate { version: String },
    Updated { from: Option<String>, to: String },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::UpToDate { version } => write!(f, "already at latest version {}", version),
            Outcome::Updated { from: Some(from), to } => {
                write!(f, "updated swagger-ui from {} to {}", from, to)
            }
            Outcome::Updated { from: None, to } => write!(f, "installed swagger-ui {}", to),
        }
    }
}

/// Version recorded in `path`, or `None` when the file does not exist.
pub fn read_current_version(path: &Path) -> Result<Option<String>, UpdateError> {
    match fs::read_to_string(path) {
        Ok(s) => {
            let version = s.trim();
            Ok((!version.is_empty()).then(|| version.to_string()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(UpdateError::ReadVersion {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Bring the embed directory up to the latest stable release.
pub fn run(config: &Config) -> Result<Outcome, UpdateError> {
    let current = read_current_version(&config.version_file)?;
    tracing::info!(current = current.as_deref().unwrap_or("none"), "checking for updates");

    let client = ReleaseClient::new(config.releases_url()?, config.timeout)?;
    let latest = client.latest_version()?;

    if current.as_deref() == Some(latest.as_str()) && !config.force {
        return Ok(Outcome::UpToDate { version: latest });
    }

    let archive_url = config.archive_url_for(&latest)?;
    tracing::info!(version = %latest, url = %archive_url, "downloading release");
    let archive = client.download(&archive_url)?;

    let parent = parent_dir(&config.embed_dir);
    fs::create_dir_all(&parent).map_err(|e| UpdateError::io("create", &parent, e))?;
    let staging = tempfile::Builder::new()
        .prefix(".swagger-ui-")
        .tempdir_in(&parent)
        .map_err(|e| UpdateError::io("create staging directory in", &parent, e))?;

    let files = archive::extract_dist(&archive, staging.path())?;
    tracing::info!(files, "extracted dist");
    rewrite::prepare_entry_page(staging.path(), ENTRY_PAGE)?;
    set_mode(staging.path(), TREE_MODE)?;

    let version = stage_version(&config.version_file, &latest)?;

    swap_in(staging.path(), &config.embed_dir)?;

    let version_file = &config.version_file;
    if let Err(e) = version.persist(version_file) {
        tracing::error!(
            embed_dir = %config.embed_dir.display(),
            version = %latest,
            "assets were installed but the version file was not updated"
        );
        return Err(UpdateError::io("write", version_file, e.error));
    }

    Ok(Outcome::Updated {
        from: current,
        to: latest,
    })
}

/// Mode of the installed embed directory.
const TREE_MODE: u32 = 0o755;

/// Mode of the version file.
const VERSION_MODE: u32 = 0o644;

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<(), UpdateError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|e| UpdateError::io("set permissions on", path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<(), UpdateError> {
    Ok(())
}

/// Write `version` to a temporary file beside `path`, ready to be renamed
/// over it once the new tree is in place.
fn stage_version(path: &Path, version: &str) -> Result<tempfile::NamedTempFile, UpdateError> {
    let parent = parent_dir(path);
    fs::create_dir_all(&parent).map_err(|e| UpdateError::io("create", &parent, e))?;
    let mut file = tempfile::Builder::new()
        .prefix(".version-")
        .tempfile_in(&parent)
        .map_err(|e| UpdateError::io("create temporary file in", &parent, e))?;
    writeln!(file, "{}", version).map_err(|e| UpdateError::io("write", file.path(), e))?;
    set_mode(file.path(), VERSION_MODE)?;
    Ok(file)
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Replace `target` with `staged`, restoring the old tree if the final rename
/// fails.
fn swap_in(staged: &Path, target: &Path) -> Result<(), UpdateError> {
    if !target.exists() {
        return fs::rename(staged, target).map_err(|e| UpdateError::io("install", target, e));
    }

    let mut backup = target.as_os_str().to_owned();
    backup.push(".previous");
    let backup = PathBuf::from(backup);
    if backup.exists() {
        fs::remove_dir_all(&backup).map_err(|e| UpdateError::io("remove", &backup, e))?;
    }

    fs::rename(target, &backup).map_err(|e| UpdateError::io("move aside", target, e))?;
    if let Err(e) = fs::rename(staged, target) {
        if let Err(restore) = fs::rename(&backup, target) {
            tracing::error!(error = %restore, backup = %backup.display(), "couldn't restore previous assets");
        }
        return Err(UpdateError::io("install", target, e));
    }

    if let Err(e) = fs::remove_dir_all(&backup) {
        tracing::warn!(error = %e, path = %backup.display(), "couldn't remove previous assets");
    }
    Ok(())
}
