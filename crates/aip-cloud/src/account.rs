//! Discovered accounts and the trait implemented by each provider.

use serde::Serialize;

use crate::Result;
use crate::text::snake_case;

/// An AWS account or Azure subscription the identity can access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloudAccount {
    /// Provider identifier (AWS account id, Azure subscription id).
    pub id: String,
    /// Display name as reported by the provider.
    pub name: String,
    /// `name` in snake case, used for profile and connection names. Falls
    /// back to the identifier when the name has no usable characters.
    pub normalized_name: String,
}

impl CloudAccount {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        let name = name.into();
        let mut normalized_name = snake_case(&name);
        if normalized_name.is_empty() {
            normalized_name = snake_case(&id);
        }
        Self {
            id,
            name,
            normalized_name,
        }
    }
}

/// Something that can enumerate the accounts an identity has access to.
///
/// Implementations perform their own authentication; callers only see the
/// final, fully materialized list.
pub trait AccountSource {
    /// Human readable provider label used in progress output.
    fn provider(&self) -> &'static str;

    fn list_accounts(&self) -> Result<Vec<CloudAccount>>;
}

/// Keep only the accounts whose id appears in `wanted`, in their original
/// order. An empty `wanted` keeps everything.
pub fn filter_accounts(accounts: Vec<CloudAccount>, wanted: &[String]) -> Vec<CloudAccount> {
    if wanted.is_empty() {
        return accounts;
    }
    accounts
        .into_iter()
        .filter(|account| wanted.iter().any(|id| *id == account.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts() -> Vec<CloudAccount> {
        vec![
            CloudAccount::new("111", "Alpha"),
            CloudAccount::new("222", "Beta"),
            CloudAccount::new("333", "Gamma"),
        ]
    }

    #[test]
    fn test_normalized_name_falls_back_to_id() {
        let account = CloudAccount::new("0f3c-77", "!!!");
        assert_eq!(account.normalized_name, "0f3c_77");
    }

    #[test]
    fn test_filter_empty_keeps_all() {
        assert_eq!(filter_accounts(accounts(), &[]).len(), 3);
    }

    #[test]
    fn test_filter_keeps_listed_in_source_order() {
        let wanted = vec!["333".to_string(), "111".to_string(), "999".to_string()];
        let ids: Vec<_> = filter_accounts(accounts(), &wanted)
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec!["111", "333"]);
    }
}
