//! Upstream release discovery and downloads.

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;
use url::Url;

use crate::error::UpdateError;

/// One entry of the GitHub releases listing.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub draft: bool,
}

/// `major.minor.patch` of a release tag such as `v5.17.14`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Parse a tag. Tags with pre-release or build suffixes do not parse.
    pub fn parse(tag: &str) -> Option<Self> {
        let numbers = tag.strip_prefix('v').unwrap_or(tag);
        let mut parts = numbers.split('.');
        let version = Version {
            major: parts.next()?.parse().ok()?,
            minor: parts.next()?.parse().ok()?,
            patch: parts.next()?.parse().ok()?,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// The stable release with the highest version.
///
/// Listing order is not trusted. Drafts, pre-releases and tags that are not
/// plain `major.minor.patch` are skipped.
pub fn latest_stable(releases: &[Release]) -> Option<&Release> {
    releases
        .iter()
        .filter(|r| !r.prerelease && !r.draft)
        .filter_map(|r| match Version::parse(&r.tag_name) {
            Some(v) => Some((v, r)),
            None => {
                tracing::warn!(tag = %r.tag_name, "skipping release with unrecognised tag");
                None
            }
        })
        .max_by_key(|(v, _)| *v)
        .map(|(_, r)| r)
}

/// Blocking client for the releases API and archive downloads.
pub struct ReleaseClient {
    client: Client,
    releases_url: Url,
}

impl ReleaseClient {
    pub fn new(releases_url: Url, timeout: Duration) -> Result<Self, UpdateError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("apidocs-update/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(UpdateError::Client)?;

        Ok(Self {
            client,
            releases_url,
        })
    }

    /// Fetch the release listing.
    pub fn releases(&self) -> Result<Vec<Release>, UpdateError> {
        let url = self.releases_url.as_str();
        let body = self.get("list releases", url)?;
        serde_json::from_slice(&body).map_err(|source| UpdateError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Tag of the latest stable release.
    pub fn latest_version(&self) -> Result<String, UpdateError> {
        let releases = self.releases()?;
        tracing::debug!(count = releases.len(), "fetched release list");
        latest_stable(&releases)
            .map(|r| r.tag_name.clone())
            .ok_or(UpdateError::NoStableRelease)
    }

    /// Download `url` completely into memory.
    pub fn download(&self, url: &Url) -> Result<Vec<u8>, UpdateError> {
        let body = self.get("download", url.as_str())?;
        tracing::debug!(%url, bytes = body.len(), "downloaded archive");
        Ok(body)
    }

    fn get(&self, op: &'static str, url: &str) -> Result<Vec<u8>, UpdateError> {
        let request_error = |source| UpdateError::Request {
            op,
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(request_error)?;
        if response.status() != reqwest::StatusCode::OK {
            return Err(UpdateError::Status {
                op,
                url: url.to_string(),
                status: response.status(),
            });
        }
        let body = response.bytes().map_err(request_error)?;
        Ok(body.to_vec())
    }
}
