//! SSO OIDC device authorization flow.
//!
//! See https://docs.aws.amazon.com/singlesignon/latest/OIDCAPIReference/

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AwsEndpoints;
use crate::{Error, Result, http, runtime};

const CLIENT_NAME: &str = "github.com/tamu-edu/aiphelper";
const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";
const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
const SLOW_DOWN_DELAY: Duration = Duration::from_secs(5);

/// What the user needs to approve the login in a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAuthorization {
    pub user_code: String,
    pub verification_uri: String,
    /// Verification URI with the user code already filled in.
    pub verification_uri_complete: String,
}

/// A portal access token obtained from the device flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Register a public client, start a device authorization for `start_url`,
/// show it through `prompt`, then wait until the user approves it.
pub fn device_login(
    endpoints: &AwsEndpoints,
    start_url: &str,
    prompt: &dyn Fn(&DeviceAuthorization),
) -> Result<AccessToken> {
    runtime::block_on(async move {
        let client = http::client()?;

        let registration: RegisterClientSuccess = post_json(
            &client,
            &format!("{}/client/register", endpoints.oidc),
            &RegisterClientRequest {
                client_name: CLIENT_NAME,
                client_type: "public",
                scopes: &["sso-portal:*"],
            },
        )
        .await?;

        let device: DeviceAuthorizationSuccess = post_json(
            &client,
            &format!("{}/device_authorization", endpoints.oidc),
            &DeviceAuthorizationRequest {
                client_id: &registration.client_id,
                client_secret: &registration.client_secret,
                start_url,
            },
        )
        .await?;

        prompt(&DeviceAuthorization {
            user_code: device.user_code.clone(),
            verification_uri: device.verification_uri.clone(),
            verification_uri_complete: device
                .verification_uri_complete
                .clone()
                .unwrap_or_else(|| device.verification_uri.clone()),
        });

        let req = CreateTokenRequest {
            client_id: &registration.client_id,
            client_secret: &registration.client_secret,
            device_code: &device.device_code,
            grant_type: GRANT_TYPE,
        };

        let mut interval = match device.interval {
            Some(secs) if secs > 0 => Duration::from_secs(secs),
            _ => DEFAULT_INTERVAL,
        };
        let deadline = Instant::now() + Duration::from_secs(device.expires_in);

        loop {
            match request_token(&client, &endpoints.oidc, &req).await? {
                Ok(res) => {
                    let expires_at = Utc::now() + chrono::Duration::seconds(res.expires_in);
                    break Ok(AccessToken {
                        access_token: res.access_token,
                        expires_at,
                    });
                }
                Err(res) => match res.error.as_str() {
                    "authorization_pending" => {}
                    "slow_down" => interval += SLOW_DOWN_DELAY,
                    "access_denied" => break Err(Error::AuthorizationDeclined),
                    "expired_token" => break Err(Error::AuthorizationExpired),
                    _ => {
                        break Err(Error::Api {
                            service: "SSO OIDC",
                            code: res.error.clone(),
                            message: res.error_description.clone().unwrap_or_default(),
                        });
                    }
                },
            }

            if Instant::now() + interval > deadline {
                break Err(Error::AuthorizationExpired);
            }
            debug!(seconds = interval.as_secs(), "waiting for device authorization");
            tokio::time::sleep(interval).await;
        }
    })
}

async fn post_json<Req, Res>(client: &Client, url: &str, req: &Req) -> Result<Res>
where
    Req: Serialize + ?Sized,
    Res: for<'de> Deserialize<'de>,
{
    let res = client.post(url).json(req).send().await?;

    match res.status() {
        StatusCode::OK => Ok(res.json::<Res>().await?),
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            let error_type = header_error_type(&res);
            let err = res.json::<OidcError>().await.unwrap_or_default();
            Err(Error::Api {
                service: "SSO OIDC",
                code: err.code(error_type.as_deref()),
                message: err.error_description.unwrap_or_default(),
            })
        }
        _ => Err(http::unknown_status(&res)),
    }
}

/// Poll the token endpoint once; an OAuth error is returned as `Ok(Err(_))`.
async fn request_token(
    client: &Client,
    base: &str,
    req: &CreateTokenRequest<'_>,
) -> Result<std::result::Result<CreateTokenSuccess, OidcError>> {
    let res = client
        .post(format!("{base}/token"))
        .json(req)
        .send()
        .await?;

    match res.status() {
        StatusCode::OK => Ok(Ok(res.json::<CreateTokenSuccess>().await?)),
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            let error_type = header_error_type(&res);
            let mut err = res.json::<OidcError>().await.unwrap_or_default();
            err.error = err.code(error_type.as_deref());
            Ok(Err(err))
        }
        _ => Err(http::unknown_status(&res)),
    }
}

fn header_error_type(res: &reqwest::Response) -> Option<String> {
    res.headers()
        .get("x-amzn-errortype")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(':').next().unwrap_or(v).to_string())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterClientRequest<'a> {
    client_name: &'a str,
    client_type: &'a str,
    scopes: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterClientSuccess {
    client_id: String,
    client_secret: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviceAuthorizationRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    start_url: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeviceAuthorizationSuccess {
    device_code: String,
    user_code: String,
    verification_uri: String,
    verification_uri_complete: Option<String>,
    expires_in: u64,
    interval: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    device_code: &'a str,
    grant_type: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTokenSuccess {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Default, Deserialize)]
struct OidcError {
    #[serde(default)]
    error: String,
    error_description: Option<String>,
}

impl OidcError {
    /// OAuth error code, from the body or else from the `x-amzn-ErrorType`
    /// exception name.
    fn code(&self, error_type: Option<&str>) -> String {
        if !self.error.is_empty() {
            return self.error.clone();
        }
        match error_type {
            Some("AuthorizationPendingException") => "authorization_pending".into(),
            Some("SlowDownException") => "slow_down".into(),
            Some("AccessDeniedException") => "access_denied".into(),
            Some("ExpiredTokenException") => "expired_token".into(),
            Some(other) => other.to_string(),
            None => "unknown_error".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_prefers_body() {
        let err = OidcError {
            error: "slow_down".into(),
            error_description: None,
        };
        assert_eq!(err.code(Some("AccessDeniedException")), "slow_down");
    }

    #[test]
    fn test_code_from_exception_name() {
        let err = OidcError::default();
        assert_eq!(
            err.code(Some("AuthorizationPendingException")),
            "authorization_pending"
        );
        assert_eq!(err.code(None), "unknown_error");
    }
}
