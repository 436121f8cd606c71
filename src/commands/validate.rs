//! # Validate Command Implementation
//!
//! Checks the single-level module nesting rule of a layout against its
//! working tree without touching the registry. The layout's module list is
//! refreshed in memory only.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Args;

use layout_cascade::actions::BuildCause;
use layout_cascade::context::{BuildContext, BuildInfo};
use layout_cascade::logger::BuildLogger;
use layout_cascade::nesting::{check_module_nesting, refresh_modules};
use layout_cascade::output::{emoji, OutputConfig};
use layout_cascade::registry::Registry;

use super::LocalHost;

/// Check the module nesting of a layout working tree
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Name of the layout project.
    #[arg(value_name = "LAYOUT")]
    pub layout: String,

    /// Working tree of the layout.
    #[arg(short, long, value_name = "DIR")]
    pub workspace: PathBuf,
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, home: &Path, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let local = LocalHost::open(home);

    println!(
        "{} Validating layout: {}",
        emoji(&out, "🔍", "[SCAN]"),
        args.layout
    );

    let mut layout = local
        .registry
        .lookup(&args.layout)?
        .ok_or_else(|| anyhow!("Layout project not found: {}", args.layout))?;
    refresh_modules(&mut layout, &args.workspace)
        .with_context(|| format!("Cannot read modules of {}", args.layout))?;

    let submodules = layout.config.submodules().count();
    println!("   Declared submodules: {}", submodules);

    let build = BuildInfo::new(
        &args.workspace,
        BuildCause::User {
            name: "validate".to_string(),
        },
    );
    let context = BuildContext::for_layout(
        local.host(),
        build,
        &layout,
        BuildLogger::new(std::io::stdout()),
    )?;

    if check_module_nesting(&context, &layout)? {
        println!("{} Module nesting is valid", emoji(&out, "✅", "[OK]"));
        Ok(())
    } else {
        println!("{} Module nesting is invalid", emoji(&out, "❌", "[ERR]"));
        Err(anyhow!("Invalid module nesting: {}", args.layout))
    }
}
