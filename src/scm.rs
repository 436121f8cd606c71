//! Source-control bindings and trigger scope restriction.
//!
//! A project's binding is a closed set of variants. Git bindings can have
//! their polling scope narrowed through the included-paths filter;
//! Subversion bindings accept the request but do not scope anything yet;
//! every other binding is rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{CheckoutStrategy, ProjectConfig};
use crate::error::{Error, Result};

/// Included-paths pattern that matches nothing a real commit touches.
/// Applied to layouts so their polling is effectively disabled.
pub const POLLING_DISABLED_PATTERN: &str = "disabled-by_layout-cascade";

/// A binding field that cannot be written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field `{field}` is not writable on the {binding} binding")]
pub struct FieldUnavailable {
    pub binding: &'static str,
    pub field: &'static str,
}

/// Write access to a binding's included-paths filter.
pub trait ScopeRestriction {
    fn set_included_paths(&mut self, pattern: &str) -> std::result::Result<(), FieldUnavailable>;
}

/// Git repository binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitScm {
    pub url: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Regex of paths whose changes trigger a build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included_regions: Option<String>,
    /// Regions pinned by the operator; rewrites are refused.
    #[serde(default)]
    pub regions_locked: bool,
}

fn default_branch() -> String {
    "master".to_string()
}

impl ScopeRestriction for GitScm {
    fn set_included_paths(&mut self, pattern: &str) -> std::result::Result<(), FieldUnavailable> {
        if self.regions_locked {
            return Err(FieldUnavailable {
                binding: "git",
                field: "included-regions",
            });
        }
        self.included_regions = Some(pattern.to_string());
        Ok(())
    }
}

/// Subversion repository binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SubversionScm {
    pub url: String,
}

/// Source-control binding of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Scm {
    Git(GitScm),
    Subversion(SubversionScm),
    /// Any binding this library does not know how to scope.
    Unsupported { kind: String },
}

impl Default for Scm {
    fn default() -> Self {
        Scm::Unsupported {
            kind: "none".to_string(),
        }
    }
}

/// Result of a scope rewrite that did not abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeChange {
    /// The filter now holds this pattern.
    Applied(String),
    /// The binding refused the write; defaults stay in effect.
    FieldUnavailable(FieldUnavailable),
    /// The binding has no scoping support yet.
    Unimplemented,
}

impl Scm {
    /// Limit build triggers to changes under `relative_path`.
    pub fn restrict_scope(&mut self, project: &str, relative_path: &str) -> Result<ScopeChange> {
        let pattern = format!("{}/.*", relative_path.trim_end_matches('/'));
        self.apply_included_paths(project, &pattern)
    }

    /// Point the included-paths filter at nothing.
    pub fn disable_polling(&mut self, project: &str) -> Result<ScopeChange> {
        self.apply_included_paths(project, POLLING_DISABLED_PATTERN)
    }

    fn apply_included_paths(&mut self, project: &str, pattern: &str) -> Result<ScopeChange> {
        match self {
            Scm::Git(git) => Ok(match git.set_included_paths(pattern) {
                Ok(()) => ScopeChange::Applied(pattern.to_string()),
                Err(unavailable) => ScopeChange::FieldUnavailable(unavailable),
            }),
            // TODO: scope Subversion bindings once they grow an included-paths filter
            Scm::Subversion(_) => Ok(ScopeChange::Unimplemented),
            Scm::Unsupported { kind } => Err(Error::UnsupportedScm {
                project: project.to_string(),
                kind: kind.clone(),
            }),
        }
    }
}

/// Mark the project so the scheduler leaves checkout ordering to the family.
pub fn use_cascade_checkout(config: &mut ProjectConfig) {
    config.checkout_strategy = CheckoutStrategy::Cascade;
}
