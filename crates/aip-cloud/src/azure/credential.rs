//! Resource Manager token acquisition.
//!
//! Tried in order: a service principal from the environment, then the
//! Azure CLI's logged-in account.

use std::process::Command;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use super::AzureEndpoints;
use crate::{Error, Result, http, runtime};

/// Resource the token is requested for.
pub const ARM_RESOURCE: &str = "https://management.azure.com/";

const ARM_SCOPE: &str = "https://management.azure.com/.default";

/// Where a token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    ClientSecret,
    AzureCli,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmToken {
    pub token: String,
    pub source: CredentialSource,
}

/// Service principal credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSecretCredential {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl ClientSecretCredential {
    /// Read `AZURE_TENANT_ID`, `AZURE_CLIENT_ID` and `AZURE_CLIENT_SECRET`
    /// through `lookup`. All three must be present and non-empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Some(Self {
            tenant_id: get("AZURE_TENANT_ID")?,
            client_id: get("AZURE_CLIENT_ID")?,
            client_secret: get("AZURE_CLIENT_SECRET")?,
        })
    }

    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Client credentials grant against the tenant's token endpoint.
    pub fn request_token(&self, endpoints: &AzureEndpoints) -> Result<String> {
        runtime::block_on(async move {
            let client = http::client()?;
            let res = client
                .post(format!(
                    "{}/{}/oauth2/v2.0/token",
                    endpoints.authority, self.tenant_id
                ))
                .form(&[
                    ("grant_type", "client_credentials"),
                    ("client_id", self.client_id.as_str()),
                    ("client_secret", self.client_secret.as_str()),
                    ("scope", ARM_SCOPE),
                ])
                .send()
                .await?;

            match res.status() {
                StatusCode::OK => Ok(res.json::<TokenSuccess>().await?.access_token),
                StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                    let err = res.json::<TokenError>().await?;
                    Err(Error::Api {
                        service: "Microsoft Entra ID",
                        code: err.error,
                        message: err.error_description,
                    })
                }
                _ => Err(http::unknown_status(&res)),
            }
        })
    }
}

/// Get a Resource Manager token from the first credential that works.
pub fn acquire_token(endpoints: &AzureEndpoints) -> Result<ArmToken> {
    if let Some(credential) = ClientSecretCredential::from_env() {
        debug!(client_id = %credential.client_id, "using client secret from environment");
        return Ok(ArmToken {
            token: credential.request_token(endpoints)?,
            source: CredentialSource::ClientSecret,
        });
    }

    Ok(ArmToken {
        token: azure_cli_token()?,
        source: CredentialSource::AzureCli,
    })
}

fn azure_cli_token() -> Result<String> {
    let program = if cfg!(windows) { "az.cmd" } else { "az" };
    let output = Command::new(program)
        .args([
            "account",
            "get-access-token",
            "--resource",
            ARM_RESOURCE,
            "--output",
            "json",
        ])
        .output()
        .map_err(|e| Error::CredentialNotFound {
            detail: format!("could not run the Azure CLI: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(stderr = %stderr.trim(), "az account get-access-token failed");
        return Err(Error::CredentialNotFound {
            detail: "the Azure CLI has no logged-in account".into(),
        });
    }

    parse_cli_token(&output.stdout)
}

fn parse_cli_token(stdout: &[u8]) -> Result<String> {
    let parsed: CliToken = serde_json::from_slice(stdout).map_err(|e| Error::CredentialNotFound {
        detail: format!("unexpected Azure CLI output: {e}"),
    })?;
    Ok(parsed.access_token)
}

#[derive(Debug, Deserialize)]
struct TokenSuccess {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenError {
    error: String,
    #[serde(default)]
    error_description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CliToken {
    access_token: String,
}
