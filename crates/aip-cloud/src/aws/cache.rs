//! The AWS CLI SSO token cache (`~/.aws/sso/cache/*.json`).

use std::fs;
use std::path::{Path, PathBuf};

use aip_fs::{CACHE_FILE_MODE, io};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use tracing::{debug, warn};

use crate::{Error, Result};

/// One cache entry. Other fields written by the AWS CLI are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedToken {
    pub start_url: String,
    pub region: String,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn usable_for(&self, start_url: &str, region: &str, now: DateTime<Utc>) -> bool {
        if self.start_url != start_url {
            debug!("token does not match desired start URL");
            return false;
        }
        if self.region != region {
            debug!("token does not match desired region");
            return false;
        }
        if self.expires_at <= now {
            debug!("token has expired");
            return false;
        }
        if self.access_token.is_empty() {
            debug!("invalid access token");
            return false;
        }
        true
    }
}

/// File name the AWS CLI uses for a start URL: hex SHA-1 of the URL.
pub fn cache_file_name(start_url: &str) -> String {
    format!("{:x}.json", Sha1::digest(start_url.as_bytes()))
}

/// Find a cached token for `start_url` and `region` that is still valid at
/// `now`. Unreadable or unparsable entries are skipped.
pub fn find(
    cache_dir: &Path,
    start_url: &str,
    region: &str,
    now: DateTime<Utc>,
) -> Option<CachedToken> {
    let entries = match fs::read_dir(cache_dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %cache_dir.display(), error = %e, "no SSO token cache");
            return None;
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    paths.into_iter().find_map(|path| match read(&path) {
        Ok(token) => token
            .usable_for(start_url, region, now)
            .then_some(token),
        Err(e) => {
            warn!(error = %e, "skipping SSO cache entry");
            None
        }
    })
}

fn read(path: &Path) -> Result<CachedToken> {
    let content = io::read_text(path)?;
    serde_json::from_str(&content).map_err(|source| Error::Cache {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `token` to its cache file, readable by the owner only.
pub fn store(cache_dir: &Path, token: &CachedToken) -> Result<PathBuf> {
    let path = cache_dir.join(cache_file_name(&token.start_url));
    let content = serde_json::to_vec(token).map_err(|source| Error::Cache {
        path: path.clone(),
        source,
    })?;
    io::write_atomic(&path, &content, Some(CACHE_FILE_MODE))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_file_name_is_sha1_of_start_url() {
        assert_eq!(
            cache_file_name("abc"),
            "a9993e364706816aba3e25717850c26c9cd0d89d.json"
        );
        assert_eq!(
            cache_file_name(""),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709.json"
        );
    }
}
