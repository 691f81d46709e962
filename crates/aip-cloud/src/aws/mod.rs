//! AWS IAM Identity Center (SSO).
//!
//! [`SsoDirectory`] ties the pieces together: reuse a cached portal token
//! when one matches, otherwise run the OIDC device authorization flow, then
//! list the accounts assigned to the user.

pub mod cache;
pub mod oidc;
pub mod portal;

use std::path::PathBuf;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::account::{AccountSource, CloudAccount, filter_accounts};
use crate::{Error, Result};

pub use cache::CachedToken;
pub use oidc::{AccessToken, DeviceAuthorization};

/// Options for one AWS run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsSettings {
    pub sso_start_url: String,
    pub sso_region: String,
    /// Role to assume; must be the same across all accounts.
    pub sso_role_name: String,
    /// Regions Steampipe should connect to. Empty uses the AWS CLI search order.
    pub regions: Vec<String>,
    /// Account ids to keep. Empty keeps every assigned account.
    pub accounts: Vec<String>,
    pub output_format: String,
    pub default_region: String,
}

impl Default for AwsSettings {
    fn default() -> Self {
        Self {
            sso_start_url: "https://aggie-innovation-platform.awsapps.com/start".into(),
            sso_region: "us-east-2".into(),
            sso_role_name: "AdministratorAccess".into(),
            regions: Vec::new(),
            accounts: Vec::new(),
            output_format: "json".into(),
            default_region: "us-east-1".into(),
        }
    }
}

/// Base URLs of the SSO services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsEndpoints {
    /// SSO OIDC service, e.g. `https://oidc.us-east-2.amazonaws.com`
    pub oidc: String,
    /// SSO portal service, e.g. `https://portal.sso.us-east-2.amazonaws.com`
    pub portal: String,
}

impl AwsEndpoints {
    pub fn for_region(region: &str) -> Self {
        Self {
            oidc: format!("https://oidc.{region}.amazonaws.com"),
            portal: format!("https://portal.sso.{region}.amazonaws.com"),
        }
    }
}

/// Callback shown the verification URL during a device login.
pub type VerificationPrompt = Box<dyn Fn(&DeviceAuthorization)>;

/// Account source backed by IAM Identity Center.
pub struct SsoDirectory {
    settings: AwsSettings,
    endpoints: AwsEndpoints,
    cache_dir: PathBuf,
    prompt: VerificationPrompt,
}

impl SsoDirectory {
    pub fn new(
        settings: AwsSettings,
        endpoints: AwsEndpoints,
        cache_dir: impl Into<PathBuf>,
        prompt: VerificationPrompt,
    ) -> Self {
        Self {
            settings,
            endpoints,
            cache_dir: cache_dir.into(),
            prompt,
        }
    }

    /// Run the device flow and cache the resulting token.
    fn login(&self) -> Result<String> {
        let token = oidc::device_login(
            &self.endpoints,
            &self.settings.sso_start_url,
            self.prompt.as_ref(),
        )?;

        let cached = CachedToken {
            start_url: self.settings.sso_start_url.clone(),
            region: self.settings.sso_region.clone(),
            access_token: token.access_token.clone(),
            expires_at: token.expires_at,
        };
        if let Err(e) = cache::store(&self.cache_dir, &cached) {
            warn!(error = %e, "could not write the SSO token cache");
        }

        Ok(token.access_token)
    }
}

impl AccountSource for SsoDirectory {
    fn provider(&self) -> &'static str {
        "AWS"
    }

    fn list_accounts(&self) -> Result<Vec<CloudAccount>> {
        let cached = cache::find(
            &self.cache_dir,
            &self.settings.sso_start_url,
            &self.settings.sso_region,
            Utc::now(),
        );

        let accounts = match cached {
            Some(token) => {
                info!("using existing access token in SSO cache");
                match portal::list_accounts(&self.endpoints, &token.access_token) {
                    Err(Error::Unauthorized { .. }) => {
                        debug!("cached SSO token was rejected, logging in again");
                        let access_token = self.login()?;
                        portal::list_accounts(&self.endpoints, &access_token)?
                    }
                    other => other?,
                }
            }
            None => {
                let access_token = self.login()?;
                portal::list_accounts(&self.endpoints, &access_token)?
            }
        };

        Ok(filter_accounts(accounts, &self.settings.accounts))
    }
}
