//! Settings for a refresh run and their defaults.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::UpdateError;

pub const DEFAULT_EMBED_DIR: &str = "packages/ui/embed";
pub const DEFAULT_VERSION_FILE: &str = "packages/ui/current_version.txt";
pub const DEFAULT_RELEASES_URL: &str = "https://api.github.com/repos/swagger-api/swagger-ui/releases";
pub const DEFAULT_ARCHIVE_URL: &str =
    "https://github.com/swagger-api/swagger-ui/archive/{version}.tar.gz";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Placeholder in the archive URL template replaced by the release tag.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Where to fetch releases from and where the bundled assets live.
#[derive(Debug, Clone)]
pub struct Config {
    pub embed_dir: PathBuf,
    pub version_file: PathBuf,
    pub releases_url: String,
    /// Contains [`VERSION_PLACEHOLDER`].
    pub archive_url: String,
    pub timeout: Duration,
    /// Reinstall even when already at the latest release.
    pub force: bool,
}

impl Config {
    pub fn releases_url(&self) -> Result<Url, UpdateError> {
        parse_url(&self.releases_url)
    }

    /// Archive URL for a release tag.
    pub fn archive_url_for(&self, version: &str) -> Result<Url, UpdateError> {
        parse_url(&self.archive_url.replace(VERSION_PLACEHOLDER, version))
    }
}

fn parse_url(url: &str) -> Result<Url, UpdateError> {
    Url::parse(url).map_err(|source| UpdateError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embed_dir: PathBuf::from(DEFAULT_EMBED_DIR),
            version_file: PathBuf::from(DEFAULT_VERSION_FILE),
            releases_url: DEFAULT_RELEASES_URL.to_string(),
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            force: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_archive_url() {
        let url = Config::default().archive_url_for("v5.17.14").unwrap();
        assert_eq!(
            url.as_str(),
            "https://github.com/swagger-api/swagger-ui/archive/v5.17.14.tar.gz"
        );
    }

    #[test]
    fn default_releases_url_parses() {
        assert_eq!(
            Config::default().releases_url().unwrap().path(),
            "/repos/swagger-api/swagger-ui/releases"
        );
    }

    #[test]
    fn bad_archive_template() {
        let config = Config {
            archive_url: "not a url/{version}".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.archive_url_for("v1.0.0"),
            Err(UpdateError::InvalidUrl { .. })
        ));
    }
}
