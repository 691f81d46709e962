//! Error types for aip-cloud

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reqwest HTTP-related error.
    #[error("reqwest: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// An HTTP status the client has no handling for.
    #[error("unexpected HTTP status {status} from {url}")]
    UnknownStatus { status: u16, url: String },

    /// A structured error returned by a cloud API.
    #[error("{service} returned {code}: {message}")]
    Api {
        service: &'static str,
        code: String,
        message: String,
    },

    /// The access token was rejected.
    #[error("{service} rejected the access token")]
    Unauthorized { service: &'static str },

    #[error("the device authorization was declined")]
    AuthorizationDeclined,

    #[error("the device authorization expired before it was approved")]
    AuthorizationExpired,

    #[error(
        "Failed to locate Azure credentials ({detail}).\nBefore running this utility, please use `az login` or environment variables to make credentials available in the current environment."
    )]
    CredentialNotFound { detail: String },

    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),

    #[error("invalid token cache entry {path}: {source}")]
    Cache {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Fs(#[from] aip_fs::Error),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
