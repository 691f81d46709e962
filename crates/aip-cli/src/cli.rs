//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// aiphelper - Configure the AWS CLI and Steampipe for the accounts you can reach
#[derive(Parser, Debug)]
#[command(name = "aiphelper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (default: <config dir>/aiphelper/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Home directory the managed files live under
    #[arg(long, global = true, env = "AIPHELPER_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Print the resulting files instead of writing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Initialize AWS
    ///
    /// Logs in through IAM Identity Center, then writes one profile per
    /// account to ~/.aws/config and one connection per account to
    /// ~/.steampipe/config/aws.spc.
    Aws(AwsArgs),

    /// Initialize Azure
    ///
    /// Lists the subscriptions available to the current Azure credential and
    /// writes one connection per subscription to
    /// ~/.steampipe/config/azure.spc.
    Azure(AzureArgs),

    /// Generate shell completions
    ///
    /// Examples:
    ///   aiphelper completions bash > ~/.local/share/bash-completion/completions/aiphelper
    ///   aiphelper completions zsh > ~/.zfunc/_aiphelper
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsArgs {
    /// AWS SSO Start URL
    #[arg(long)]
    pub sso_start_url: Option<String>,

    /// AWS SSO Region
    #[arg(long)]
    pub sso_region: Option<String>,

    /// SSO Role To Assume (must be the same across all accounts)
    #[arg(long)]
    pub sso_role_name: Option<String>,

    /// Comma-separated list of regions to tell Steampipe to connect to
    /// (default: uses same search order as aws cli)
    #[arg(long)]
    pub regions: Option<String>,

    /// Comma-separated list of accounts to tell Steampipe to connect to
    /// (default: all accounts assigned to you through SSO)
    #[arg(long)]
    pub accounts: Option<String>,

    /// Output format for AWS CLI
    #[arg(long)]
    pub output_format: Option<String>,

    /// Default region for AWS CLI operations
    #[arg(long)]
    pub default_region: Option<String>,

    /// Do not try to open the verification page in a browser
    #[arg(long)]
    pub no_browser: bool,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct AzureArgs {
    /// Azure tenant the Steampipe connections authenticate against
    #[arg(long)]
    pub tenant_id: Option<String>,

    /// Enumerate subscriptions under the root management group instead of
    /// the ones visible to the current credential
    #[arg(short = 'g', long = "enum-mgmt-group")]
    pub enum_mgmt_group: bool,

    /// Root management group to enumerate
    #[arg(long)]
    pub root_group: Option<String>,
}
