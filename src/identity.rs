//! # Family Identity
//!
//! Every project of a family carries a [`ProjectIdentity`] in its own
//! configuration: the family id shared by the layout, its cascade and its
//! members, plus the role the project plays. Because the tag travels with
//! the configuration it survives renames and reloads, and it is the only
//! thing that correlates derived projects back to their layout.
//!
//! Assigning an identity mutates the project in memory only; callers persist
//! the project explicitly.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::registry::{Project, Registry};

/// Role of a project within its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Layout,
    Cascade,
    Member,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Layout => write!(f, "LAYOUT"),
            Role::Cascade => write!(f, "CASCADE"),
            Role::Member => write!(f, "MEMBER"),
        }
    }
}

/// Family correlation tag persisted on a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectIdentity {
    pub family_id: String,
    pub role: Role,
}

impl ProjectIdentity {
    pub fn new(family_id: impl Into<String>, role: Role) -> Self {
        Self {
            family_id: family_id.into(),
            role,
        }
    }

    pub fn matches(&self, family_id: &str, role: Role) -> bool {
        self.family_id == family_id && self.role == role
    }
}

impl fmt::Display for ProjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.role, self.family_id)
    }
}

/// Return the layout's identity, assigning a fresh family id on first use.
pub fn ensure_layout_identity(layout: &mut Project) -> ProjectIdentity {
    match &layout.config.identity {
        Some(identity) if identity.role == Role::Layout => identity.clone(),
        _ => {
            let identity = ProjectIdentity::new(Uuid::new_v4().to_string(), Role::Layout);
            layout.config.identity = Some(identity.clone());
            identity
        }
    }
}

/// Tag `cascade` with the layout's family id and the cascade role.
pub fn ensure_cascade_identity(layout: &Project, cascade: &mut Project) -> Result<ProjectIdentity> {
    ensure_derived_identity(layout, cascade, Role::Cascade)
}

/// Tag `member` with the layout's family id and the member role.
pub fn ensure_member_identity(layout: &Project, member: &mut Project) -> Result<ProjectIdentity> {
    ensure_derived_identity(layout, member, Role::Member)
}

fn ensure_derived_identity(
    layout: &Project,
    project: &mut Project,
    role: Role,
) -> Result<ProjectIdentity> {
    let family_id = family_id(layout)?;
    if let Some(identity) = &project.config.identity {
        if identity.matches(family_id, role) {
            return Ok(identity.clone());
        }
    }
    let identity = ProjectIdentity::new(family_id, role);
    project.config.identity = Some(identity.clone());
    Ok(identity)
}

/// Read the identity tag of a project.
pub fn identity(project: &Project) -> Result<&ProjectIdentity> {
    project
        .config
        .identity
        .as_ref()
        .ok_or_else(|| Error::MissingIdentity {
            project: project.name.clone(),
        })
}

/// Family id of a project.
pub fn family_id(project: &Project) -> Result<&str> {
    identity(project).map(|identity| identity.family_id.as_str())
}

fn family_projects(
    registry: &dyn Registry,
    family_id: &str,
    role: Role,
) -> Result<Vec<Project>> {
    Ok(registry
        .projects()?
        .into_iter()
        .filter(|project| {
            project
                .config
                .identity
                .as_ref()
                .is_some_and(|identity| identity.matches(family_id, role))
        })
        .collect())
}

/// All member projects of a family, in registry order.
pub fn member_project_list(registry: &dyn Registry, family_id: &str) -> Result<Vec<Project>> {
    family_projects(registry, family_id, Role::Member)
}

/// The cascade project of a family, if one exists.
pub fn cascade_project(registry: &dyn Registry, family_id: &str) -> Result<Option<Project>> {
    Ok(family_projects(registry, family_id, Role::Cascade)?
        .into_iter()
        .next())
}
