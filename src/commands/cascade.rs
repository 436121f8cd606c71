//! # Cascade Command Implementation
//!
//! Queues a cascade build on behalf of one member project, the way a member
//! project's "build the cascade" page action does.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use layout_cascade::actions::request_cascade_build;
use layout_cascade::output::{emoji, OutputConfig};

use super::LocalHost;

/// Request a cascade build on behalf of a member project
#[derive(Args, Debug)]
pub struct CascadeArgs {
    /// Name of the cascade project to build.
    #[arg(long, value_name = "NAME")]
    pub cascade: String,

    /// Name of the member project requesting the build.
    #[arg(long, value_name = "NAME")]
    pub member: String,
}

/// Execute the `cascade` command.
pub fn execute(args: CascadeArgs, home: &Path, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let local = LocalHost::open(home);

    request_cascade_build(&local.host(), &args.cascade, &args.member)
        .with_context(|| format!("Cannot request cascade build of {}", args.cascade))?;

    println!(
        "{} Queued cascade build of {} for member {}",
        emoji(&out, "🚀", "[QUEUED]"),
        args.cascade,
        args.member
    );
    Ok(())
}
