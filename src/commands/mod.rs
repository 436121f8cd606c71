//! # CLI Command Implementations
//!
//! Each subcommand of `layout-cascade` lives in its own module with an
//! `Args` struct derived with `clap` and an `execute` function that wires the
//! on-disk host (registry, view registry, build queue) into the
//! `layout_cascade` library.

pub mod cascade;
pub mod ls;
pub mod reconcile;
pub mod validate;

use std::path::Path;

use layout_cascade::defaults::queue_path;
use layout_cascade::naming::TokenMacroExpander;
use layout_cascade::queue::FileQueue;
use layout_cascade::registry::FileRegistry;

/// The on-disk host collaborators rooted at one registry home.
pub struct LocalHost {
    pub registry: FileRegistry,
    pub queue: FileQueue,
    pub expander: TokenMacroExpander,
}

impl LocalHost {
    pub fn open(home: &Path) -> Self {
        Self {
            registry: FileRegistry::new(home),
            queue: FileQueue::new(queue_path(home)),
            expander: TokenMacroExpander,
        }
    }

    pub fn host(&self) -> layout_cascade::context::Host<'_> {
        layout_cascade::context::Host {
            registry: &self.registry,
            views: &self.registry,
            scheduler: &self.queue,
            expander: &self.expander,
        }
    }
}
