//! # Project Configuration Schema and Parsing
//!
//! This module defines the data structures that make up a project's
//! declarative configuration, the document each registry entry persists as
//! `config.yaml`. Cloning a layout into a member copies this document
//! verbatim, so everything that must travel with a project lives here,
//! including its family identity.
//!
//! ## Key Components
//!
//! - **`ProjectConfig`**: the full configuration of one project.
//! - **`ModuleName`** / **`ModuleDecl`**: a qualified `group:artifact` module
//!   name and a declared submodule (name plus path relative to the layout
//!   working tree).
//! - **`LayoutOptions`**: the naming templates and flags carried by the layout
//!   build wrapper.
//! - **`BuildWrapper`**: decorators applied around a project's builds. The
//!   layout wrapper is what triggers reconciliation.
//!
//! ## Example
//!
//! ```
//! use layout_cascade::config;
//!
//! let yaml = r#"
//! scm:
//!   type: git
//!   url: https://example.com/repo.git
//! root-module: com.example:layout
//! modules:
//!   - name: com.example:layout
//!     relative-path: ""
//!   - name: com.example:core
//!     relative-path: core
//! build-wrappers:
//!   - wrapper: layout
//! "#;
//! let project = config::parse(yaml).unwrap();
//! assert_eq!(project.modules.len(), 2);
//! assert!(project.layout_options().is_some());
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::identity::ProjectIdentity;
use crate::scm::Scm;

/// The descriptor file every module directory carries.
pub const MODULE_DESCRIPTOR: &str = "module.yaml";

/// Kind of project stored in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectKind {
    /// A module-set build project (layouts and members).
    #[default]
    Maven,
    /// The aggregator project of a family.
    Cascade,
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectKind::Maven => write!(f, "maven"),
            ProjectKind::Cascade => write!(f, "cascade"),
        }
    }
}

/// Qualified module name in `group:artifact` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleName {
    pub group_id: String,
    pub artifact_id: String,
}

impl ModuleName {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

impl FromStr for ModuleName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((group, artifact))
                if !group.is_empty() && !artifact.is_empty() && !artifact.contains(':') =>
            {
                Ok(Self::new(group, artifact))
            }
            _ => Err(Error::ConfigParse {
                message: format!("Invalid module name: {:?}", s),
                hint: Some("Use the form group:artifact".to_string()),
            }),
        }
    }
}

impl TryFrom<String> for ModuleName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ModuleName> for String {
    fn from(value: ModuleName) -> Self {
        value.to_string()
    }
}

/// A submodule declared by a layout project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleDecl {
    /// Qualified module name.
    pub name: ModuleName,
    /// Path of the module directory relative to the layout working tree.
    /// Empty for the layout's own root module.
    #[serde(default)]
    pub relative_path: String,
}

impl ModuleDecl {
    pub fn new(name: ModuleName, relative_path: impl Into<String>) -> Self {
        Self {
            name,
            relative_path: relative_path.into(),
        }
    }
}

/// Options of the layout build wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LayoutOptions {
    /// Template for the cascade project name.
    #[serde(default = "default_cascade_project_name")]
    pub cascade_project_name: String,
    /// Template for member project names.
    #[serde(default = "default_member_project_name")]
    pub member_project_name: String,
    /// Dashboard view collecting the whole family.
    #[serde(default = "default_layout_view_name")]
    pub layout_view_name: String,
    /// Members build inside the layout working tree instead of their own.
    #[serde(default = "default_true")]
    pub use_shared_workspace: bool,
    /// Schedule a validation build of each member after it is synchronized.
    #[serde(default = "default_true")]
    pub build_after_layout: bool,
    /// Goals used by member validation builds.
    #[serde(default = "default_validate_goals")]
    pub maven_validate_goals: Vec<String>,
}

fn default_cascade_project_name() -> String {
    "${ARTIFACT_ID}-cascade".to_string()
}

fn default_member_project_name() -> String {
    "${GROUP_ID}--${ARTIFACT_ID}".to_string()
}

fn default_layout_view_name() -> String {
    "cascade".to_string()
}

fn default_true() -> bool {
    true
}

fn default_validate_goals() -> Vec<String> {
    vec!["validate".to_string()]
}

fn default_root_pom() -> String {
    MODULE_DESCRIPTOR.to_string()
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            cascade_project_name: default_cascade_project_name(),
            member_project_name: default_member_project_name(),
            layout_view_name: default_layout_view_name(),
            use_shared_workspace: true,
            build_after_layout: true,
            maven_validate_goals: default_validate_goals(),
        }
    }
}

/// A decorator applied around a project's builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "wrapper", rename_all = "kebab-case")]
pub enum BuildWrapper {
    /// Runs layout reconciliation; only layout projects carry it.
    Layout(LayoutOptions),
    /// Any other wrapper, preserved as-is.
    Other { name: String },
}

/// Checkout ordering used by the build scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckoutStrategy {
    #[default]
    Default,
    /// Skip default checkout ordering; the family orders checkouts itself.
    Cascade,
}

/// Full declarative configuration of a project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectConfig {
    #[serde(default)]
    pub kind: ProjectKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub scm: Scm,
    #[serde(default)]
    pub checkout_strategy: CheckoutStrategy,
    /// Build root descriptor, relative to the working tree.
    #[serde(default = "default_root_pom")]
    pub root_pom: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_workspace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_module: Option<ModuleName>,
    #[serde(default)]
    pub modules: Vec<ModuleDecl>,
    #[serde(default)]
    pub build_wrappers: Vec<BuildWrapper>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<ProjectIdentity>,
}

impl ProjectConfig {
    /// Fresh configuration of the given kind with defaults everywhere else.
    pub fn new(kind: ProjectKind) -> Self {
        Self {
            kind,
            root_pom: default_root_pom(),
            ..Self::default()
        }
    }

    /// Options of the layout wrapper, if this is a layout project.
    pub fn layout_options(&self) -> Option<&LayoutOptions> {
        self.build_wrappers.iter().find_map(|wrapper| match wrapper {
            BuildWrapper::Layout(options) => Some(options),
            BuildWrapper::Other { .. } => None,
        })
    }

    /// Drop the layout wrapper so reconciliation does not recurse onto
    /// derived projects.
    pub fn remove_layout_wrapper(&mut self) {
        self.build_wrappers
            .retain(|wrapper| !matches!(wrapper, BuildWrapper::Layout(_)));
    }

    /// Whether `module` is this project's own root module.
    pub fn is_root_module(&self, module: &ModuleDecl) -> bool {
        self.root_module.as_ref() == Some(&module.name)
    }

    /// Declared submodules, excluding the root module.
    pub fn submodules(&self) -> impl Iterator<Item = &ModuleDecl> {
        self.modules
            .iter()
            .filter(move |module| !self.is_root_module(module))
    }

    /// Serialize to the YAML document persisted by the registry.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Parse a project configuration from YAML.
pub fn parse(yaml: &str) -> Result<ProjectConfig> {
    if yaml.trim().is_empty() {
        return Ok(ProjectConfig::new(ProjectKind::Maven));
    }
    serde_yaml::from_str(yaml).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: None,
    })
}

/// Load a project configuration from a file.
pub fn from_file(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content).map_err(|e| match e {
        Error::ConfigParse { message, hint } => Error::ConfigParse {
            message: format!("{}: {}", path.display(), message),
            hint,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Role;
    use crate::scm::GitScm;

    const LAYOUT: &str = r#"
description: layout
scm:
  type: git
  url: https://example.com/family.git
  branch: main
root-module: com.example:layout
modules:
  - name: com.example:layout
    relative-path: ""
  - name: com.example:core
    relative-path: core
  - name: com.example:api
    relative-path: api
build-wrappers:
  - wrapper: layout
    member-project-name: "${ARTIFACT_ID}"
    use-shared-workspace: false
  - wrapper: other
    name: timestamps
identity:
  family-id: 4c1d
  role: LAYOUT
"#;

    #[test]
    fn test_parse_layout_config() {
        let config = parse(LAYOUT).unwrap();
        assert_eq!(config.kind, ProjectKind::Maven);
        assert_eq!(config.root_pom, MODULE_DESCRIPTOR);
        assert_eq!(config.modules.len(), 3);
        assert_eq!(
            config.root_module,
            Some(ModuleName::new("com.example", "layout"))
        );
        match &config.scm {
            Scm::Git(GitScm { url, branch, .. }) => {
                assert_eq!(url, "https://example.com/family.git");
                assert_eq!(branch, "main");
            }
            other => panic!("Expected git binding, got {:?}", other),
        }
        let identity = config.identity.as_ref().unwrap();
        assert_eq!(identity.family_id, "4c1d");
        assert_eq!(identity.role, Role::Layout);
    }

    #[test]
    fn test_layout_options_defaults_fill_missing_fields() {
        let config = parse(LAYOUT).unwrap();
        let options = config.layout_options().unwrap();
        assert_eq!(options.member_project_name, "${ARTIFACT_ID}");
        assert_eq!(options.cascade_project_name, "${ARTIFACT_ID}-cascade");
        assert_eq!(options.layout_view_name, "cascade");
        assert!(!options.use_shared_workspace);
        assert!(options.build_after_layout);
        assert_eq!(options.maven_validate_goals, vec!["validate"]);
    }

    #[test]
    fn test_submodules_skip_root_module() {
        let config = parse(LAYOUT).unwrap();
        let names: Vec<String> = config.submodules().map(|m| m.name.to_string()).collect();
        assert_eq!(names, vec!["com.example:core", "com.example:api"]);
    }

    #[test]
    fn test_remove_layout_wrapper_keeps_others() {
        let mut config = parse(LAYOUT).unwrap();
        config.remove_layout_wrapper();
        assert!(config.layout_options().is_none());
        assert_eq!(
            config.build_wrappers,
            vec![BuildWrapper::Other {
                name: "timestamps".to_string()
            }]
        );
    }

    #[test]
    fn test_yaml_round_trip_preserves_config() {
        let config = parse(LAYOUT).unwrap();
        let reparsed = parse(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn test_empty_document_is_default_project() {
        let config = parse("  \n").unwrap();
        assert_eq!(config, ProjectConfig::new(ProjectKind::Maven));
    }

    #[test]
    fn test_module_name_parsing() {
        let name: ModuleName = "group:artifact".parse().unwrap();
        assert_eq!(name.group_id, "group");
        assert_eq!(name.artifact_id, "artifact");
        assert_eq!(name.to_string(), "group:artifact");

        assert!("no-separator".parse::<ModuleName>().is_err());
        assert!(":artifact".parse::<ModuleName>().is_err());
        assert!("a:b:c".parse::<ModuleName>().is_err());
    }

    #[test]
    fn test_invalid_module_name_in_yaml_is_rejected() {
        let result = parse("root-module: not-qualified\n");
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_from_file_reports_path() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "kind: [broken").unwrap();
        let err = from_file(&path).unwrap_err();
        assert!(err.to_string().contains("config.yaml"));
    }
}
