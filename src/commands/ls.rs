//! # Ls Command Implementation
//!
//! Lists the projects of the registry home with their family role and id,
//! optionally restricted to the family of one layout. Read-only.

use std::path::Path;

use anyhow::{anyhow, Result};
use clap::Args;

use layout_cascade::identity::family_id;
use layout_cascade::output::OutputConfig;
use layout_cascade::registry::{Project, Registry};

use super::LocalHost;

/// List projects with their family role
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Only list the family of this layout project.
    #[arg(value_name = "LAYOUT")]
    pub layout: Option<String>,

    /// Show only the total count of projects.
    #[arg(long)]
    pub count: bool,
}

fn render(out: &OutputConfig, project: &Project) -> String {
    match project.identity() {
        Some(identity) => format!(
            "{}  {}  {}",
            project.name,
            out.role(identity.role),
            identity.family_id
        ),
        None => format!("{}  -", project.name),
    }
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs, home: &Path, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let local = LocalHost::open(home);

    let mut projects = local.registry.projects()?;
    if let Some(name) = &args.layout {
        let layout = local
            .registry
            .lookup(name)?
            .ok_or_else(|| anyhow!("Layout project not found: {}", name))?;
        let family = family_id(&layout)?.to_string();
        projects.retain(|project| {
            project
                .identity()
                .is_some_and(|identity| identity.family_id == family)
        });
    }

    if args.count {
        println!("{}", projects.len());
        return Ok(());
    }

    for project in &projects {
        println!("{}", render(&out, project));
    }
    Ok(())
}
