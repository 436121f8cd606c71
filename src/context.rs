//! Per-build execution context.
//!
//! A reconciliation runs inside exactly one layout build. The context bundles
//! the injected host capabilities, that build's facts (workspace, variables,
//! cause, markers), the layout options and the build log.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::actions::{BuildAction, BuildCause};
use crate::config::LayoutOptions;
use crate::error::{Error, Result};
use crate::logger::BuildLogger;
use crate::naming::TemplateExpander;
use crate::queue::BuildScheduler;
use crate::registry::{Project, Registry};
use crate::view::ViewRegistry;

/// Host capabilities consumed by reconciliation.
#[derive(Clone, Copy)]
pub struct Host<'a> {
    pub registry: &'a dyn Registry,
    pub views: &'a dyn ViewRegistry,
    pub scheduler: &'a dyn BuildScheduler,
    pub expander: &'a dyn TemplateExpander,
}

/// Facts about the layout build driving the reconciliation.
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub number: u64,
    /// Layout working tree.
    pub workspace: PathBuf,
    /// Root directory of the node executing the build.
    pub node_root: PathBuf,
    /// Build variables available to name templates.
    pub variables: HashMap<String, String>,
    pub cause: BuildCause,
    /// Markers attached to this build.
    pub actions: Vec<BuildAction>,
}

impl BuildInfo {
    pub fn new(workspace: impl Into<PathBuf>, cause: BuildCause) -> Self {
        let workspace = workspace.into();
        let node_root = workspace
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| workspace.clone());
        Self {
            number: 1,
            workspace,
            node_root,
            variables: HashMap::new(),
            cause,
            actions: Vec::new(),
        }
    }

    pub fn has_action(&self, action: &BuildAction) -> bool {
        self.actions.contains(action)
    }
}

pub struct BuildContext<'a> {
    pub host: Host<'a>,
    pub build: BuildInfo,
    options: LayoutOptions,
    logger: BuildLogger,
}

impl<'a> BuildContext<'a> {
    pub fn new(host: Host<'a>, build: BuildInfo, options: LayoutOptions, logger: BuildLogger) -> Self {
        Self {
            host,
            build,
            options,
            logger,
        }
    }

    /// Context for a build of `layout`, taking the options from its layout
    /// wrapper.
    pub fn for_layout(
        host: Host<'a>,
        build: BuildInfo,
        layout: &Project,
        logger: BuildLogger,
    ) -> Result<Self> {
        let options = layout
            .config
            .layout_options()
            .cloned()
            .ok_or_else(|| Error::MissingLayoutOptions {
                project: layout.name.clone(),
            })?;
        Ok(Self::new(host, build, options, logger))
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn log(&self, text: &str) {
        self.logger.log(text);
    }

    pub fn log_tab(&self, text: &str) {
        self.logger.log_tab(text);
    }

    pub fn log_err(&self, text: &str) {
        self.logger.log_err(text);
    }

    pub fn log_exc(&self, error: &dyn std::error::Error) {
        self.logger.log_exc(error);
    }
}
