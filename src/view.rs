//! Dashboard views grouping the projects of a family.

use serde::{Deserialize, Serialize};

use crate::context::BuildContext;
use crate::error::Result;
use crate::registry::Project;

/// Column shown by a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewColumn {
    Status,
    Name,
    LastBuild,
    /// Family dependency graph link.
    Graph,
    /// Last release of the project.
    LastRelease,
}

/// A named list of projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListView {
    pub name: String,
    #[serde(default)]
    pub jobs: Vec<String>,
    #[serde(default)]
    pub columns: Vec<ViewColumn>,
}

impl ListView {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            jobs: Vec::new(),
            columns: vec![ViewColumn::Status, ViewColumn::Name, ViewColumn::LastBuild],
        }
    }

    /// Add a project; adding twice is a no-op.
    pub fn add(&mut self, project: &str) {
        if !self.contains(project) {
            self.jobs.push(project.to_string());
        }
    }

    pub fn contains(&self, project: &str) -> bool {
        self.jobs.iter().any(|job| job == project)
    }

    /// Append `column` unless one of that type is already shown.
    pub fn ensure_column(&mut self, column: ViewColumn) -> bool {
        if self.columns.contains(&column) {
            return false;
        }
        self.columns.push(column);
        true
    }
}

/// Store of dashboard views.
pub trait ViewRegistry {
    /// Return the view named `name`, creating it when missing.
    fn ensure_view(&self, name: &str) -> Result<ListView>;

    fn save_view(&self, view: &ListView) -> Result<()>;

    /// Where an operator finds the view.
    fn view_url(&self, view: &ListView) -> String;
}

/// Make sure the family view exists, holds `project` and shows the family
/// columns.
pub fn ensure_project_view(context: &BuildContext, project: &Project) -> Result<()> {
    let views = context.host.views;
    let mut view = views.ensure_view(&context.options().layout_view_name)?;
    view.add(&project.name);
    view.ensure_column(ViewColumn::Graph);
    view.ensure_column(ViewColumn::LastRelease);
    views.save_view(&view)?;
    context.log_tab(&format!("Project view: {}", views.view_url(&view)));
    Ok(())
}
