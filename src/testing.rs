//! Shared fixture for unit tests: an on-disk registry and queue in a temp
//! directory plus a layout working tree with module descriptors.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::actions::BuildCause;
use crate::config::{BuildWrapper, LayoutOptions, ProjectKind, MODULE_DESCRIPTOR};
use crate::context::{BuildContext, BuildInfo, Host};
use crate::logger::{BuildLogger, LogBuffer};
use crate::naming::TokenMacroExpander;
use crate::nesting::refresh_modules;
use crate::queue::FileQueue;
use crate::registry::{FileRegistry, Project, Registry};
use crate::scm::{GitScm, Scm};

pub(crate) const LAYOUT: &str = "layout";

pub(crate) struct Fixture {
    _temp: TempDir,
    pub registry: FileRegistry,
    pub queue: FileQueue,
    pub expander: TokenMacroExpander,
    pub node_root: PathBuf,
    pub workspace: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        let node_root = temp.path().join("node");
        let workspace = node_root.join("workspace").join(LAYOUT);
        fs::create_dir_all(&workspace).unwrap();
        Self {
            registry: FileRegistry::new(&home),
            queue: FileQueue::new(home.join("queue.jsonl")),
            expander: TokenMacroExpander,
            node_root,
            workspace,
            _temp: temp,
        }
    }

    pub fn host(&self) -> Host<'_> {
        Host {
            registry: &self.registry,
            views: &self.registry,
            scheduler: &self.queue,
            expander: &self.expander,
        }
    }

    /// Write `module.yaml` under `dir` (relative to the layout workspace).
    pub fn write_descriptor(&self, dir: &str, artifact: &str, modules: &[&str]) {
        write_descriptor(&self.workspace, dir, artifact, modules);
    }

    /// Persisted layout project declaring one flat submodule per entry.
    pub fn layout(&self, modules: &[&str]) -> Project {
        self.layout_with(modules, |_| {})
    }

    pub fn layout_with(&self, modules: &[&str], options: impl FnOnce(&mut LayoutOptions)) -> Project {
        self.write_descriptor("", LAYOUT, modules);
        for module in modules {
            self.write_descriptor(module, module, &[]);
        }

        let mut layout_options = LayoutOptions::default();
        options(&mut layout_options);

        let mut layout = self.registry.create(ProjectKind::Maven, LAYOUT).unwrap();
        layout.config.scm = Scm::Git(GitScm {
            url: "https://example.com/family.git".to_string(),
            branch: "master".to_string(),
            included_regions: None,
            regions_locked: false,
        });
        layout
            .config
            .build_wrappers
            .push(BuildWrapper::Layout(layout_options));
        refresh_modules(&mut layout, &self.workspace).unwrap();
        self.registry.save(&layout).unwrap();
        layout
    }

    pub fn build(&self) -> BuildInfo {
        let mut build = BuildInfo::new(
            &self.workspace,
            BuildCause::User {
                name: "tester".to_string(),
            },
        );
        build.node_root = self.node_root.clone();
        build
    }

    pub fn context(&self, layout: &Project) -> (BuildContext<'_>, LogBuffer) {
        self.context_with(layout, |_| {})
    }

    pub fn context_with(
        &self,
        layout: &Project,
        customize: impl FnOnce(&mut BuildInfo),
    ) -> (BuildContext<'_>, LogBuffer) {
        let mut build = self.build();
        customize(&mut build);
        let (logger, buffer) = BuildLogger::buffered();
        let context = BuildContext::for_layout(self.host(), build, layout, logger).unwrap();
        (context, buffer)
    }
}

pub(crate) fn write_descriptor(root: &Path, dir: &str, artifact: &str, modules: &[&str]) {
    let dir = root.join(dir);
    fs::create_dir_all(&dir).unwrap();
    let mut yaml = format!("group-id: com.example\nartifact-id: {}\n", artifact);
    if !modules.is_empty() {
        yaml.push_str("modules:\n");
        for module in modules {
            yaml.push_str(&format!("  - {}\n", module));
        }
    }
    fs::write(dir.join(MODULE_DESCRIPTOR), yaml).unwrap();
}
