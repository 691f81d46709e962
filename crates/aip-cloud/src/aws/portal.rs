//! SSO portal account listing.

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use super::AwsEndpoints;
use crate::account::CloudAccount;
use crate::{Error, Result, http, runtime};

const PAGE_SIZE: &str = "100";

/// List every account assigned to the holder of `access_token`, following
/// continuation tokens until the last page.
pub fn list_accounts(endpoints: &AwsEndpoints, access_token: &str) -> Result<Vec<CloudAccount>> {
    runtime::block_on(async move {
        let client = http::client()?;
        let url = format!("{}/assignment/accounts", endpoints.portal);

        let mut accounts = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut req = client
                .get(&url)
                .header("x-amz-sso_bearer_token", access_token)
                .query(&[("max_result", PAGE_SIZE)]);
            if let Some(token) = &next_token {
                req = req.query(&[("next_token", token.as_str())]);
            }

            let res = req.send().await?;
            let page = match res.status() {
                StatusCode::OK => res.json::<ListAccountsPage>().await?,
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    return Err(Error::Unauthorized {
                        service: "SSO portal",
                    });
                }
                _ => return Err(http::unknown_status(&res)),
            };

            debug!(count = page.account_list.len(), "received account page");
            accounts.extend(
                page.account_list
                    .into_iter()
                    .map(|a| CloudAccount::new(a.account_id, a.account_name)),
            );

            match page.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }

        Ok(accounts)
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListAccountsPage {
    #[serde(default)]
    account_list: Vec<AccountInfo>,
    next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountInfo {
    account_id: String,
    #[serde(default)]
    account_name: String,
}
