//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use layout_cascade::defaults::{default_home, HOME_ENV};

/// Layout Cascade - Keep cascade and member projects in sync with a layout
#[derive(Parser, Debug)]
#[command(name = "layout-cascade")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Registry home holding projects, views and the build queue.
    ///
    /// Defaults to the platform data directory
    /// (`~/.local/share/layout-cascade` on Linux).
    #[arg(long, global = true, value_name = "DIR", env = HOME_ENV)]
    home: Option<PathBuf>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconcile the family of a layout project (create, update or delete)
    Reconcile(commands::reconcile::ReconcileArgs),

    /// Check the module nesting of a layout working tree
    Validate(commands::validate::ValidateArgs),

    /// List projects with their family role
    Ls(commands::ls::LsArgs),

    /// Request a cascade build on behalf of a member project
    Cascade(commands::cascade::CascadeArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let _ = env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp(None)
            .try_init();

        let home = self.home.unwrap_or_else(default_home);
        log::debug!("Registry home: {}", home.display());

        match self.command {
            Commands::Reconcile(args) => commands::reconcile::execute(args, &home, &self.color),
            Commands::Validate(args) => commands::validate::execute(args, &home, &self.color),
            Commands::Ls(args) => commands::ls::execute(args, &home, &self.color),
            Commands::Cascade(args) => commands::cascade::execute(args, &home, &self.color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_reconcile_arguments() {
        let cli = Cli::try_parse_from([
            "layout-cascade",
            "--home",
            "/tmp/home",
            "reconcile",
            "layout",
            "--action",
            "update",
            "--workspace",
            "/tmp/ws",
            "--var",
            "RELEASE=1.0",
        ])
        .unwrap();
        assert_eq!(cli.home, Some(PathBuf::from("/tmp/home")));
        match cli.command {
            Commands::Reconcile(args) => {
                assert_eq!(args.layout, "layout");
                assert_eq!(args.action, "update");
                assert_eq!(args.vars, vec![("RELEASE".to_string(), "1.0".to_string())]);
            }
            other => panic!("Expected reconcile, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_variable_rejected() {
        let result = Cli::try_parse_from([
            "layout-cascade",
            "reconcile",
            "layout",
            "--workspace",
            "/tmp/ws",
            "--var",
            "NOEQUALS",
        ]);
        assert!(result.is_err());
    }
}
