//! Module descriptors and the single-level nesting rule.
//!
//! A layout declares its submodules; a submodule must not declare any of
//! its own. The rule is checked against the descriptors found in the layout
//! working tree, not only against the declared list, because the list is a
//! one-level snapshot of what is on disk.

use std::path::Path;

use serde::Deserialize;

use crate::config::{ModuleDecl, ModuleName, MODULE_DESCRIPTOR};
use crate::context::BuildContext;
use crate::error::{Error, Result};
use crate::registry::Project;

/// On-disk descriptor of a module (`module.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleDescriptor {
    pub group_id: String,
    pub artifact_id: String,
    /// Paths of nested modules, relative to this module.
    #[serde(default)]
    pub modules: Vec<String>,
}

impl ModuleDescriptor {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigParse {
            message: format!("Cannot read module descriptor {}: {}", path.display(), e),
            hint: None,
        })?;
        serde_yaml::from_str(&content).map_err(|e| Error::ConfigParse {
            message: format!("{}: {}", path.display(), e),
            hint: None,
        })
    }

    /// Descriptor of the module rooted at `dir`.
    pub fn in_dir(dir: &Path) -> Result<Self> {
        Self::from_file(&dir.join(MODULE_DESCRIPTOR))
    }

    pub fn name(&self) -> ModuleName {
        ModuleName::new(self.group_id.clone(), self.artifact_id.clone())
    }
}

/// Read the layout descriptor at `root_pom` and the descriptor of each
/// submodule it lists. Returns the root module name and the declared
/// modules, root first.
pub fn scan_modules(workspace: &Path, root_pom: &str) -> Result<(ModuleName, Vec<ModuleDecl>)> {
    let root = ModuleDescriptor::from_file(&workspace.join(root_pom))?;
    let root_dir = Path::new(root_pom).parent().unwrap_or_else(|| Path::new(""));

    let mut modules = vec![ModuleDecl::new(
        root.name(),
        root_dir.to_string_lossy().into_owned(),
    )];
    for path in &root.modules {
        let relative = root_dir.join(path.trim_matches('/'));
        let descriptor = ModuleDescriptor::in_dir(&workspace.join(&relative))?;
        modules.push(ModuleDecl::new(
            descriptor.name(),
            relative.to_string_lossy().replace('\\', "/"),
        ));
    }
    Ok((root.name(), modules))
}

/// Replace the layout's declared module list with what its working tree
/// describes.
pub fn refresh_modules(layout: &mut Project, workspace: &Path) -> Result<()> {
    let (root, modules) = scan_modules(workspace, &layout.config.root_pom)?;
    layout.config.root_module = Some(root);
    layout.config.modules = modules;
    Ok(())
}

/// Verify the module nesting convention:
///
/// 1. the layout project must declare submodules;
/// 2. member modules must not declare submodules of their own.
///
/// Stops at the first offending module, in declaration order.
pub fn check_module_nesting(context: &BuildContext, layout: &Project) -> Result<bool> {
    if layout.config.submodules().next().is_none() {
        context.log_err(&format!("Layout project has no modules: {}", layout.name));
        context.log_err(
            "Cascade member projects must be defined in layout project as module entries.",
        );
        return Ok(false);
    }

    for module in layout.config.submodules() {
        let module_dir = context.build.workspace.join(&module.relative_path);
        let descriptor = ModuleDescriptor::in_dir(&module_dir)?;
        if descriptor.modules.is_empty() {
            continue;
        }
        context.log_err(&format!("Project contains modules: {}", descriptor.name()));
        context.log_err("Cascade member projects must not be using module entries.");
        return Ok(false);
    }

    Ok(true)
}
