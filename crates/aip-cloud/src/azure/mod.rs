//! Azure subscriptions.
//!
//! [`SubscriptionDirectory`] acquires a Resource Manager token from the
//! environment or the Azure CLI, then lists either the subscriptions the
//! caller can see or the subscriptions below a management group.

pub mod arm;
pub mod credential;

use tracing::info;

use crate::Result;
use crate::account::{AccountSource, CloudAccount};

/// Options for one Azure run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureSettings {
    pub tenant_id: String,
    /// Enumerate the descendants of `root_management_group` instead of the
    /// caller's subscriptions.
    pub enum_management_group: bool,
    pub root_management_group: String,
}

impl Default for AzureSettings {
    fn default() -> Self {
        Self {
            tenant_id: "68f381e3-46da-47b9-ba57-6f322b8f0da1".into(),
            enum_management_group: false,
            root_management_group: "tamu".into(),
        }
    }
}

impl AzureSettings {
    pub fn scope(&self) -> SubscriptionScope {
        if self.enum_management_group {
            SubscriptionScope::ManagementGroup(self.root_management_group.clone())
        } else {
            SubscriptionScope::CurrentUser
        }
    }
}

/// Which subscriptions to enumerate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionScope {
    /// Every subscription visible to the credential.
    CurrentUser,
    /// Subscriptions anywhere below the named management group.
    ManagementGroup(String),
}

/// Base URLs of the Azure services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureEndpoints {
    /// Microsoft Entra ID authority host.
    pub authority: String,
    /// Azure Resource Manager.
    pub resource_manager: String,
}

impl Default for AzureEndpoints {
    fn default() -> Self {
        Self {
            authority: "https://login.microsoftonline.com".into(),
            resource_manager: "https://management.azure.com".into(),
        }
    }
}

/// Account source backed by Azure Resource Manager.
pub struct SubscriptionDirectory {
    settings: AzureSettings,
    endpoints: AzureEndpoints,
}

impl SubscriptionDirectory {
    pub fn new(settings: AzureSettings, endpoints: AzureEndpoints) -> Self {
        Self {
            settings,
            endpoints,
        }
    }
}

impl AccountSource for SubscriptionDirectory {
    fn provider(&self) -> &'static str {
        "Azure"
    }

    fn list_accounts(&self) -> Result<Vec<CloudAccount>> {
        let token = credential::acquire_token(&self.endpoints)?;
        info!(source = ?token.source, "acquired Azure Resource Manager token");
        arm::list_subscriptions(&self.endpoints, &token.token, &self.settings.scope())
    }
}
