//! # Layout Cascade CLI
//!
//! Binary entry point for the `layout-cascade` command-line tool. It parses
//! arguments with `clap`, dispatches to a subcommand and reports failures
//! through `anyhow`. All reconciliation logic lives in the library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
