//! # Artifact Registry
//!
//! This module provides the `Registry` trait, the capability through which
//! reconciliation creates, finds, copies, persists and deletes projects, and
//! `FileRegistry`, its on-disk implementation.
//!
//! ## Design
//!
//! Nothing in the reconciliation engine reaches for ambient host state. The
//! registry is injected, so tests can wrap `FileRegistry` to inject failures
//! (for example, a delete that errors for one member) without touching the
//! engine itself.
//!
//! ## On-disk layout
//!
//! ```text
//! <home>/
//!   jobs/<name>/config.yaml   one project configuration per project
//!   views/<name>.yaml         dashboard views
//! ```

use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::config::{self, ProjectConfig, ProjectKind};
use crate::error::{Error, Result};
use crate::identity::ProjectIdentity;
use crate::view::{ListView, ViewRegistry};

const CONFIG_FILE: &str = "config.yaml";

/// A project loaded from the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub name: String,
    /// Folder holding the project; `None` for top-level projects.
    pub parent: Option<String>,
    pub config: ProjectConfig,
}

impl Project {
    pub fn new(name: impl Into<String>, config: ProjectConfig) -> Self {
        Self {
            name: name.into(),
            parent: None,
            config,
        }
    }

    pub fn kind(&self) -> ProjectKind {
        self.config.kind
    }

    pub fn identity(&self) -> Option<&ProjectIdentity> {
        self.config.identity.as_ref()
    }

    /// Post-load hook: re-attach the project to its folder and name after its
    /// configuration was replaced.
    pub fn on_load(&mut self, parent: Option<String>, name: String) {
        debug!("Loaded project {} (parent: {:?})", name, parent);
        self.parent = parent;
        self.name = name;
    }
}

/// Store of projects.
pub trait Registry {
    /// Create a new project with a default configuration of `kind`.
    fn create(&self, kind: ProjectKind, name: &str) -> Result<Project>;

    /// Find a project by name.
    fn lookup(&self, name: &str) -> Result<Option<Project>>;

    /// Whether a project named `name` exists.
    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.lookup(name)?.is_some())
    }

    /// Create `new_name` as a copy of the persisted configuration of `source`.
    fn copy(&self, source: &Project, new_name: &str) -> Result<Project>;

    /// Remove a project.
    fn delete(&self, project: &Project) -> Result<()>;

    /// Persist a project's configuration.
    fn save(&self, project: &Project) -> Result<()>;

    /// Location of the persisted configuration of a project.
    fn config_file(&self, project: &Project) -> PathBuf;

    /// Every project, in registry order.
    fn projects(&self) -> Result<Vec<Project>>;
}

/// Registry backed by a home directory.
#[derive(Debug, Clone)]
pub struct FileRegistry {
    home: PathBuf,
}

impl FileRegistry {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    fn jobs_dir(&self) -> PathBuf {
        self.home.join("jobs")
    }

    fn views_dir(&self) -> PathBuf {
        self.home.join("views")
    }

    fn job_dir(&self, name: &str) -> PathBuf {
        self.jobs_dir().join(name)
    }

    fn config_path(&self, name: &str) -> PathBuf {
        self.job_dir(name).join(CONFIG_FILE)
    }

    fn load(&self, name: &str) -> Result<Project> {
        let config = config::from_file(&self.config_path(name))?;
        Ok(Project::new(name, config))
    }

    fn write_config(&self, name: &str, config: &ProjectConfig) -> Result<()> {
        fs::create_dir_all(self.job_dir(name))?;
        fs::write(self.config_path(name), config.to_yaml()?)?;
        Ok(())
    }
}

fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(Error::Registry {
            message: format!("Invalid project name: {:?}", name),
        });
    }
    Ok(())
}

impl Registry for FileRegistry {
    fn create(&self, kind: ProjectKind, name: &str) -> Result<Project> {
        check_name(name)?;
        if self.exists(name)? {
            return Err(Error::Registry {
                message: format!("Project already exists: {}", name),
            });
        }
        let project = Project::new(name, ProjectConfig::new(kind));
        self.write_config(name, &project.config)?;
        debug!("Created {} project {}", kind, name);
        Ok(project)
    }

    fn lookup(&self, name: &str) -> Result<Option<Project>> {
        check_name(name)?;
        if !self.config_path(name).is_file() {
            return Ok(None);
        }
        self.load(name).map(Some)
    }

    fn copy(&self, source: &Project, new_name: &str) -> Result<Project> {
        check_name(new_name)?;
        if self.exists(new_name)? {
            return Err(Error::Registry {
                message: format!("Project already exists: {}", new_name),
            });
        }
        fs::create_dir_all(self.job_dir(new_name))?;
        fs::copy(self.config_file(source), self.config_path(new_name))?;
        debug!("Copied project {} to {}", source.name, new_name);
        self.load(new_name)
    }

    fn delete(&self, project: &Project) -> Result<()> {
        let dir = self.job_dir(&project.name);
        if !dir.is_dir() {
            return Err(Error::ProjectNotFound {
                name: project.name.clone(),
            });
        }
        fs::remove_dir_all(dir)?;
        debug!("Deleted project {}", project.name);
        Ok(())
    }

    fn save(&self, project: &Project) -> Result<()> {
        check_name(&project.name)?;
        self.write_config(&project.name, &project.config)
    }

    fn config_file(&self, project: &Project) -> PathBuf {
        self.config_path(&project.name)
    }

    fn projects(&self) -> Result<Vec<Project>> {
        let dir = self.jobs_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.path().join(CONFIG_FILE).is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        names.iter().map(|name| self.load(name)).collect()
    }
}

impl ViewRegistry for FileRegistry {
    fn ensure_view(&self, name: &str) -> Result<ListView> {
        check_name(name)?;
        let path = self.views_dir().join(format!("{}.yaml", name));
        if path.is_file() {
            let content = fs::read_to_string(&path)?;
            return Ok(serde_yaml::from_str(&content)?);
        }
        let view = ListView::new(name);
        self.save_view(&view)?;
        Ok(view)
    }

    fn save_view(&self, view: &ListView) -> Result<()> {
        check_name(&view.name)?;
        fs::create_dir_all(self.views_dir())?;
        let path = self.views_dir().join(format!("{}.yaml", view.name));
        fs::write(path, serde_yaml::to_string(view)?)?;
        Ok(())
    }

    fn view_url(&self, view: &ListView) -> String {
        self.views_dir()
            .join(format!("{}.yaml", view.name))
            .display()
            .to_string()
    }
}
