//! `aiphelper aws`

use aip_cloud::aws::{AwsEndpoints, AwsSettings, DeviceAuthorization, SsoDirectory, VerificationPrompt};
use aip_cloud::{AccountSource, Renderer};
use aip_fs::ManagedFile;
use colored::Colorize;
use tracing::warn;

use super::{Context, Outcome, apply};
use crate::error::{CliError, Result};

pub fn run_aws(ctx: &Context, settings: AwsSettings, no_browser: bool) -> Result<()> {
    let endpoints = AwsEndpoints::for_region(&settings.sso_region);
    let source = SsoDirectory::new(
        settings.clone(),
        endpoints,
        ctx.layout.sso_cache_dir(),
        verification_prompt(no_browser),
    );
    sync_aws(ctx, &source, &settings)?;
    Ok(())
}

/// Enumerate accounts from `source` and install the AWS CLI profiles and
/// Steampipe connections.
pub fn sync_aws(
    ctx: &Context,
    source: &dyn AccountSource,
    settings: &AwsSettings,
) -> Result<Vec<(ManagedFile, Outcome)>> {
    println!("{} Fetching list of all accounts...", "=>".blue().bold());
    let accounts = source.list_accounts()?;
    if accounts.is_empty() && !settings.accounts.is_empty() {
        return Err(CliError::user(format!(
            "none of the requested accounts ({}) are assigned to you",
            settings.accounts.join(", ")
        )));
    }
    println!(
        "User has access to {} {} accounts.",
        accounts.len().to_string().bold(),
        source.provider()
    );

    let renderer = Renderer::new()?;
    let mut outcomes = Vec::with_capacity(2);

    println!("Updating AWS config file with profiles.");
    let block = renderer.aws_config(&ctx.marker, settings, &accounts)?;
    outcomes.push((
        ManagedFile::AwsConfig,
        apply(ctx, ManagedFile::AwsConfig, &block)?,
    ));

    println!("Updating Steampipe AWS Plugin config file with connections.");
    let block = renderer.steampipe_aws(&ctx.marker, settings, &accounts)?;
    outcomes.push((
        ManagedFile::SteampipeAws,
        apply(ctx, ManagedFile::SteampipeAws, &block)?,
    ));

    println!("{}", "Done.".green().bold());
    Ok(outcomes)
}

fn verification_prompt(no_browser: bool) -> VerificationPrompt {
    Box::new(move |auth: &DeviceAuthorization| {
        println!(
            "If browser is not opened automatically, please open link:\n{}",
            auth.verification_uri_complete.cyan()
        );
        println!("Confirm the code {} when asked.", auth.user_code.bold());
        if !no_browser && let Err(e) = webbrowser::open(&auth.verification_uri_complete) {
            warn!(error = %e, "could not open a browser");
        }
        println!("{} Waiting for the login to be approved...", "=>".blue().bold());
    })
}
