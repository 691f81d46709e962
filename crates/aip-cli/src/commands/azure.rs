//! `aiphelper azure`

use aip_cloud::azure::{AzureEndpoints, AzureSettings, SubscriptionDirectory, SubscriptionScope};
use aip_cloud::{AccountSource, Renderer};
use aip_fs::ManagedFile;
use colored::Colorize;

use super::{Context, Outcome, apply};
use crate::error::Result;

pub fn run_azure(ctx: &Context, settings: AzureSettings) -> Result<()> {
    let source = SubscriptionDirectory::new(settings.clone(), AzureEndpoints::default());
    sync_azure(ctx, &source, &settings)?;
    Ok(())
}

/// Enumerate subscriptions from `source` and install the Steampipe Azure
/// connections.
pub fn sync_azure(
    ctx: &Context,
    source: &dyn AccountSource,
    settings: &AzureSettings,
) -> Result<Outcome> {
    match settings.scope() {
        SubscriptionScope::CurrentUser => println!(
            "{} Fetching subscriptions for the current credential...",
            "=>".blue().bold()
        ),
        SubscriptionScope::ManagementGroup(group) => println!(
            "{} Fetching subscriptions under management group {}...",
            "=>".blue().bold(),
            group.cyan()
        ),
    }
    let subscriptions = source.list_accounts()?;
    println!(
        "User has access to {} {} subscriptions.",
        subscriptions.len().to_string().bold(),
        source.provider()
    );

    let renderer = Renderer::new()?;
    println!("Updating Steampipe Azure Plugin config file with connections.");
    let block = renderer.steampipe_azure(&ctx.marker, settings, &subscriptions)?;
    let outcome = apply(ctx, ManagedFile::SteampipeAzure, &block)?;

    println!("{}", "Done.".green().bold());
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aip_blocks::{Marker, Placement};
    use aip_cloud::{CloudAccount, Error};
    use aip_fs::HomeLayout;
    use std::fs;
    use tempfile::TempDir;

    struct Subscriptions(Vec<CloudAccount>);

    impl AccountSource for Subscriptions {
        fn provider(&self) -> &'static str {
            "Azure"
        }

        fn list_accounts(&self) -> aip_cloud::Result<Vec<CloudAccount>> {
            Ok(self.0.clone())
        }
    }

    struct NoCredential;

    impl AccountSource for NoCredential {
        fn provider(&self) -> &'static str {
            "Azure"
        }

        fn list_accounts(&self) -> aip_cloud::Result<Vec<CloudAccount>> {
            Err(Error::CredentialNotFound {
                detail: "no token".into(),
            })
        }
    }

    fn context(dir: &TempDir) -> Context {
        Context {
            layout: HomeLayout::new(dir.path()),
            marker: Marker::new("AZ"),
            dry_run: false,
        }
    }

    #[test]
    fn test_sync_replaces_existing_block() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let path = ctx.layout.managed(ManagedFile::SteampipeAzure);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            "# mine\n### AZ_START ###\nconnection \"azure_old\" {}\n### AZ_END ###\n# also mine\n",
        )
        .unwrap();

        let source = Subscriptions(vec![CloudAccount::new("sub-1", "AIP Dev")]);
        let outcome = sync_azure(&ctx, &source, &AzureSettings::default()).unwrap();

        assert!(matches!(outcome, Outcome::Written(Placement::Replaced(_))));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# mine\n### AZ_START ###\n"));
        assert!(text.ends_with("### AZ_END ###\n# also mine\n"));
        assert!(text.contains("connection \"azure_aip_dev\" {"));
        assert!(!text.contains("azure_old"));
    }

    #[test]
    fn test_credential_error_leaves_files_alone() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);

        let err = sync_azure(&ctx, &NoCredential, &AzureSettings::default()).unwrap_err();

        assert!(err.to_string().contains("az login"));
        assert!(!ctx.layout.managed(ManagedFile::SteampipeAzure).exists());
    }
}
