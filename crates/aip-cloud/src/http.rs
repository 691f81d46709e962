//! HTTP client construction, based on async reqwest with tokio.

use std::time::Duration;

use reqwest::{Client, ClientBuilder, Response};

use crate::{Error, Result};

/// The user agent sent on each HTTP request.
pub const USER_AGENT: &str = concat!("aiphelper/", env!("CARGO_PKG_VERSION"));

/// Get a new client builder for async HTTP(S) requests.
pub fn builder() -> ClientBuilder {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(60))
}

/// Build a client; call this from inside [`crate::runtime::block_on`].
pub fn client() -> Result<Client> {
    Ok(builder().build()?)
}

pub(crate) fn unknown_status(res: &Response) -> Error {
    Error::UnknownStatus {
        status: res.status().as_u16(),
        url: res.url().to_string(),
    }
}
