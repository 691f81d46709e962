//! Command implementations for aiphelper

pub mod aws;
pub mod azure;

use aip_blocks::{Marker, Placement, ensure_and_replace, preview};
use aip_fs::{HomeLayout, ManagedFile};
use colored::Colorize;

use crate::error::Result;

/// State shared by the provider commands.
#[derive(Debug, Clone)]
pub struct Context {
    pub layout: HomeLayout,
    pub marker: Marker,
    pub dry_run: bool,
}

/// What happened to one managed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written(Placement),
    /// Dry run: the full contents the file would have.
    Preview(String),
}

/// Install `block` into `file`, or print the would-be contents on a dry run.
pub fn apply(ctx: &Context, file: ManagedFile, block: &str) -> Result<Outcome> {
    let path = ctx.layout.managed(file);

    if ctx.dry_run {
        let text = preview(&path, &ctx.marker, block)?;
        println!("{} {} (dry run)", "=>".blue().bold(), file.to_string().cyan());
        print!("{text}");
        if !text.is_empty() && !text.ends_with('\n') {
            println!();
        }
        return Ok(Outcome::Preview(text));
    }

    let placement = ensure_and_replace(&path, &ctx.marker, block)?;
    let action = match placement {
        Placement::Appended => "added",
        Placement::Replaced(_) => "updated",
    };
    println!("   {} {} {}", "+".green(), file.to_string().cyan(), action.dimmed());
    Ok(Outcome::Written(placement))
}
