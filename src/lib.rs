//! # Layout Cascade Library
//!
//! This library keeps a family of build projects in sync with one
//! authoritative *layout* project. The layout declares a set of submodules;
//! from it the library derives a single *cascade* project (the aggregator
//! that drives ordered builds of the family) and one *member* project per
//! submodule. It is used by the `layout-cascade` command-line tool but the
//! reconciliation engine takes all of its collaborators as injected traits,
//! so it can be embedded in any build host.
//!
//! ## Quick Example
//!
//! ```
//! use layout_cascade::config::{BuildWrapper, LayoutOptions, ProjectKind};
//! use layout_cascade::identity::{ensure_layout_identity, Role};
//! use layout_cascade::registry::{FileRegistry, Registry};
//!
//! let home = tempfile::tempdir().unwrap();
//! let registry = FileRegistry::new(home.path());
//!
//! let mut layout = registry.create(ProjectKind::Maven, "layout").unwrap();
//! layout
//!     .config
//!     .build_wrappers
//!     .push(BuildWrapper::Layout(LayoutOptions::default()));
//! let identity = ensure_layout_identity(&mut layout);
//! registry.save(&layout).unwrap();
//!
//! assert_eq!(identity.role, Role::Layout);
//! assert!(registry.exists("layout").unwrap());
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: the declarative document each project
//!   persists, including its family identity.
//! - **Identity (`identity`)**: the `{family id, role}` tag correlating the
//!   layout, cascade and members.
//! - **Host capabilities (`registry`, `view`, `queue`, `naming`)**: project
//!   storage, dashboard views, the build scheduler and template expansion.
//! - **Reconciliation (`reconcile`)**: the create/update/delete state machine,
//!   built from `nesting` (structural validation), `scm` (trigger scoping),
//!   `cloner` and `member` (member synchronization).
//!
//! ## Execution Flow
//!
//! [`reconcile::process`] runs inside one layout build:
//!
//! 1.  **Validation**: the single-level module nesting rule.
//! 2.  **View**: the family dashboard view.
//! 3.  **Layout**: polling and checkout normalization of the layout itself.
//! 4.  **Cascade**: create, update or delete the cascade project.
//! 5.  **Members**: create, update or delete one project per submodule.

pub mod actions;
pub mod cloner;
pub mod config;
pub mod context;
pub mod defaults;
pub mod error;
pub mod identity;
pub mod logger;
pub mod member;
pub mod naming;
pub mod nesting;
pub mod output;
pub mod queue;
pub mod reconcile;
pub mod registry;
pub mod scm;
pub mod view;

#[cfg(test)]
mod naming_proptest;
#[cfg(test)]
mod testing;
