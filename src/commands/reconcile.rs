//! # Reconcile Command Implementation
//!
//! Runs one layout build against the local registry home: the layout's
//! module list is refreshed from its working tree, then the family is
//! reconciled for the requested action. The build log streams to stdout.
//!
//! The command fails (non-zero exit) when reconciliation reports failure:
//! a nesting violation, or a member `delete`/`update` on an empty family.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Args;

use layout_cascade::actions::BuildCause;
use layout_cascade::context::{BuildContext, BuildInfo};
use layout_cascade::logger::BuildLogger;
use layout_cascade::nesting::refresh_modules;
use layout_cascade::output::{emoji, OutputConfig};
use layout_cascade::reconcile::{process, ConfigAction};
use layout_cascade::registry::Registry;

use super::LocalHost;

/// Reconcile the family of a layout project
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Name of the layout project.
    #[arg(value_name = "LAYOUT")]
    pub layout: String,

    /// Requested transition: create, update or delete.
    #[arg(short, long, default_value = "create")]
    pub action: String,

    /// Working tree of the layout build.
    #[arg(short, long, value_name = "DIR")]
    pub workspace: PathBuf,

    /// Root directory of the executing node. Defaults to the parent of the
    /// workspace.
    #[arg(long, value_name = "DIR")]
    pub node_root: Option<PathBuf>,

    /// Build variable available to name templates (repeatable).
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_variable)]
    pub vars: Vec<(String, String)>,

    /// Number of the layout build.
    #[arg(long, default_value_t = 1)]
    pub build_number: u64,

    /// User recorded as the cause of scheduled validation builds.
    #[arg(long, default_value = "cli")]
    pub user: String,
}

/// Parse a `KEY=VALUE` build variable.
pub fn parse_variable(value: &str) -> std::result::Result<(String, String), String> {
    match value.split_once('=') {
        Some((key, val)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), val.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got `{}`", value)),
    }
}

fn build_info(args: &ReconcileArgs, workspace: PathBuf) -> Result<BuildInfo> {
    let mut build = BuildInfo::new(
        workspace,
        BuildCause::User {
            name: args.user.clone(),
        },
    );
    if let Some(node_root) = &args.node_root {
        build.node_root = node_root
            .canonicalize()
            .with_context(|| format!("Node root not found: {}", node_root.display()))?;
    }
    build.number = args.build_number;

    let mut variables = HashMap::from([("BUILD_NUMBER".to_string(), args.build_number.to_string())]);
    variables.extend(args.vars.iter().cloned());
    build.variables = variables;
    Ok(build)
}

/// Execute the `reconcile` command.
pub fn execute(args: ReconcileArgs, home: &Path, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let local = LocalHost::open(home);

    let workspace = args
        .workspace
        .canonicalize()
        .with_context(|| format!("Workspace not found: {}", args.workspace.display()))?;

    let mut layout = local
        .registry
        .lookup(&args.layout)?
        .ok_or_else(|| anyhow!("Layout project not found: {}", args.layout))?;

    refresh_modules(&mut layout, &workspace)
        .with_context(|| format!("Cannot read modules of {}", args.layout))?;
    local.registry.save(&layout)?;

    let build = build_info(&args, workspace)?;
    let context = BuildContext::for_layout(
        local.host(),
        build,
        &layout,
        BuildLogger::new(std::io::stdout()),
    )?;

    let action = ConfigAction::from(args.action.as_str());
    match process(&context, &mut layout, &action) {
        Ok(true) => {
            println!(
                "{} Reconciled {} ({})",
                emoji(&out, "✅", "[OK]"),
                layout.name,
                action
            );
            Ok(())
        }
        Ok(false) => {
            println!(
                "{} Reconciliation of {} failed",
                emoji(&out, "❌", "[ERR]"),
                layout.name
            );
            Err(anyhow!("Reconciliation failed: {}", layout.name))
        }
        Err(e) => {
            context.log_exc(&e);
            Err(anyhow::Error::new(e).context(format!("Reconciliation aborted: {}", layout.name)))
        }
    }
}
