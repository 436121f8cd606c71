//! Markers attached to scheduled builds, and the member page build request.
//!
//! Markers carry no behavior of their own; the build executor reads them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{LayoutOptions, ProjectKind};
use crate::context::Host;
use crate::error::{Error, Result};

/// Marker attached to a scheduled build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum BuildAction {
    /// Do not check out sources; the layout already did.
    CheckoutSkip,
    /// Build spawned by layout reconciliation; must not reconcile again.
    LayoutLogic,
    /// Replace the project's goals for this build.
    MavenGoals { goals: Vec<String> },
    /// Badge: layout run.
    LayoutBadge,
    /// Badge: validation run.
    ValidateBadge,
    /// Cascade build requested from a member page.
    MemberBuild { cascade: String, member: String },
}

impl fmt::Display for BuildAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildAction::CheckoutSkip => write!(f, "Ignore SCM Checkout."),
            BuildAction::LayoutLogic => write!(f, "Layout Logic"),
            BuildAction::MavenGoals { goals } => write!(f, "Maven Goals: {}", goals.join(" ")),
            BuildAction::LayoutBadge => write!(f, "Layout"),
            BuildAction::ValidateBadge => write!(f, "Validate"),
            BuildAction::MemberBuild { cascade, member } => {
                write!(f, "Cascade Build: {} from {}", cascade, member)
            }
        }
    }
}

/// Why a build was scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cause", rename_all = "kebab-case")]
pub enum BuildCause {
    User { name: String },
    /// Cascade build requested from a member page.
    MemberUser,
}

impl fmt::Display for BuildCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildCause::User { name } => write!(f, "Started by user {}", name),
            BuildCause::MemberUser => write!(f, "Started by member project"),
        }
    }
}

/// Actions for a metadata-only validation build.
pub fn maven_validate_goals(options: &LayoutOptions, extra: &[&str]) -> Vec<BuildAction> {
    let mut goals = options.maven_validate_goals.clone();
    goals.extend(extra.iter().map(|goal| goal.to_string()));
    vec![
        BuildAction::LayoutBadge,
        BuildAction::ValidateBadge,
        BuildAction::MavenGoals { goals },
    ]
}

/// Start a cascade build on behalf of a member project.
pub fn request_cascade_build(host: &Host, cascade_name: &str, member_name: &str) -> Result<()> {
    let cascade = host
        .registry
        .lookup(cascade_name)?
        .ok_or_else(|| Error::ProjectNotFound {
            name: cascade_name.to_string(),
        })?;
    if cascade.kind() != ProjectKind::Cascade {
        return Err(Error::InvalidProject {
            name: cascade_name.to_string(),
            message: "not a cascade project".to_string(),
        });
    }

    let member = host
        .registry
        .lookup(member_name)?
        .ok_or_else(|| Error::ProjectNotFound {
            name: member_name.to_string(),
        })?;
    if member.kind() != ProjectKind::Maven {
        return Err(Error::InvalidProject {
            name: member_name.to_string(),
            message: "not a member project".to_string(),
        });
    }

    host.scheduler.schedule_build(
        &cascade,
        0,
        &BuildCause::MemberUser,
        vec![BuildAction::MemberBuild {
            cascade: cascade_name.to_string(),
            member: member_name.to_string(),
        }],
    )
}
