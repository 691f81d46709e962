//! aiphelper CLI
//!
//! Discovers the AWS accounts and Azure subscriptions a user can reach and
//! keeps the AWS CLI and Steampipe configuration files in sync with them.

mod cli;
mod commands;
mod error;
mod logging;
mod settings;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::debug;

use aip_fs::HomeLayout;
use cli::{Cli, Commands};
use commands::Context;
use error::Result;
use settings::FileSettings;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: could not set up logging: {}", "warning".yellow().bold(), e);
    }
    if cli.verbose {
        debug!("Verbose mode enabled");
    }

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            "aiphelper",
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    let file_settings = FileSettings::load(cli.config.as_deref())?;
    let layout = match cli.home {
        Some(home) => HomeLayout::new(home),
        None => HomeLayout::detect()?,
    };
    debug!(home = %layout.home().display(), "resolved home directory");

    let ctx = Context {
        layout,
        marker: file_settings.marker(),
        dry_run: cli.dry_run,
    };

    match cli.command {
        Commands::Aws(args) => {
            let settings = file_settings.aws_settings(&args);
            commands::aws::run_aws(&ctx, settings, args.no_browser)
        }
        Commands::Azure(args) => {
            let settings = file_settings.azure_settings(&args);
            commands::azure::run_azure(&ctx, settings)
        }
        Commands::Completions { .. } => Ok(()),
    }
}
