//! Well-known locations under the user's home directory.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Environment variable overriding the home directory used for every path.
pub const HOME_ENV: &str = "AIPHELPER_HOME";

/// Config files whose marker block the tool owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagedFile {
    /// `~/.aws/config`, the AWS CLI profile file
    AwsConfig,
    /// `~/.steampipe/config/aws.spc`, Steampipe AWS plugin connections
    SteampipeAws,
    /// `~/.steampipe/config/azure.spc`, Steampipe Azure plugin connections
    SteampipeAzure,
}

impl ManagedFile {
    /// Path relative to the home directory, with forward slashes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwsConfig => ".aws/config",
            Self::SteampipeAws => ".steampipe/config/aws.spc",
            Self::SteampipeAzure => ".steampipe/config/azure.spc",
        }
    }
}

impl std::fmt::Display for ManagedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "~/{}", self.as_str())
    }
}

/// Resolves tool paths against a home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeLayout {
    home: PathBuf,
}

impl HomeLayout {
    /// Use an explicit home directory.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Resolve the home directory from `AIPHELPER_HOME`, falling back to the
    /// platform home directory.
    pub fn detect() -> Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(home));
        }
        dirs::home_dir().map(Self::new).ok_or(Error::HomeNotFound)
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Absolute path of a managed file.
    pub fn managed(&self, file: ManagedFile) -> PathBuf {
        file.as_str()
            .split('/')
            .fold(self.home.clone(), |acc, part| acc.join(part))
    }

    /// Directory holding cached SSO access tokens (`~/.aws/sso/cache`).
    pub fn sso_cache_dir(&self) -> PathBuf {
        self.home.join(".aws").join("sso").join("cache")
    }
}

/// Default location of the optional settings file.
/// Returns: `<config_dir>/aiphelper/config.toml`
pub fn default_settings_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("aiphelper").join("config.toml"))
}
