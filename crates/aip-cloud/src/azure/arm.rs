//! Azure Resource Manager subscription enumeration.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{AzureEndpoints, SubscriptionScope};
use crate::account::CloudAccount;
use crate::{Error, Result, http, runtime};

const SUBSCRIPTIONS_API_VERSION: &str = "2022-12-01";
const MANAGEMENT_GROUPS_API_VERSION: &str = "2020-05-01";
const MANAGEMENT_GROUP_TYPE: &str = "Microsoft.Management/managementGroups";

/// List subscriptions in `scope`, following `nextLink` across pages.
pub fn list_subscriptions(
    endpoints: &AzureEndpoints,
    token: &str,
    scope: &SubscriptionScope,
) -> Result<Vec<CloudAccount>> {
    runtime::block_on(async move {
        let client = http::client()?;
        let base = endpoints.resource_manager.trim_end_matches('/');

        match scope {
            SubscriptionScope::CurrentUser => {
                let url = format!("{base}/subscriptions?api-version={SUBSCRIPTIONS_API_VERSION}");
                let items: Vec<Subscription> = collect_pages(&client, token, url).await?;
                Ok(items
                    .into_iter()
                    .map(|s| CloudAccount::new(s.subscription_id, s.display_name))
                    .collect())
            }
            SubscriptionScope::ManagementGroup(group) => {
                let url = format!(
                    "{base}/providers/Microsoft.Management/managementGroups/{group}/descendants?api-version={MANAGEMENT_GROUPS_API_VERSION}"
                );
                let items: Vec<Descendant> = collect_pages(&client, token, url).await?;
                Ok(items
                    .into_iter()
                    .filter(|d| !d.kind.eq_ignore_ascii_case(MANAGEMENT_GROUP_TYPE))
                    .map(|d| CloudAccount::new(d.name, d.properties.display_name))
                    .collect())
            }
        }
    })
}

async fn collect_pages<T: DeserializeOwned>(
    client: &Client,
    token: &str,
    first: String,
) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut next = Some(first);

    while let Some(url) = next {
        debug!(%url, "requesting Resource Manager page");
        let res = client.get(&url).bearer_auth(token).send().await?;
        let page = match res.status() {
            StatusCode::OK => res.json::<Page<T>>().await?,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(Error::Unauthorized {
                    service: "Azure Resource Manager",
                });
            }
            _ => return Err(http::unknown_status(&res)),
        };
        items.extend(page.value);
        next = page.next_link.filter(|link| !link.is_empty());
    }

    Ok(items)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Page<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Subscription {
    subscription_id: String,
    #[serde(default)]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct Descendant {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    #[serde(default)]
    properties: DescendantProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescendantProperties {
    #[serde(default)]
    display_name: String,
}
