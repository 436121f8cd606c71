//! Shared test utilities for integration and E2E tests.
//!
//! A [`TestFixture`] owns a temporary directory laid out the way a build node
//! would be:
//!
//! ```text
//! <temp>/home/                      registry home (projects, views, queue)
//! <temp>/node/workspace/layout/     layout working tree with module.yaml files
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_layout(&["core", "api"]);
//! fixture.command().arg("ls").assert().success();
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Layout project configurations.
#[allow(dead_code)]
pub mod configs {
    /// Layout on a git binding with default layout options.
    pub const GIT_LAYOUT: &str = r#"
scm:
  type: git
  url: https://example.com/family.git
build-wrappers:
  - wrapper: layout
"#;

    /// Layout on a subversion binding.
    pub const SVN_LAYOUT: &str = r#"
scm:
  type: subversion
  url: svn://example.com/family/trunk
build-wrappers:
  - wrapper: layout
"#;

    /// Layout whose members do not schedule validation builds.
    pub const QUIET_LAYOUT: &str = r#"
scm:
  type: git
  url: https://example.com/family.git
build-wrappers:
  - wrapper: layout
    build-after-layout: false
"#;
}

pub const LAYOUT: &str = "layout";

pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        let fixture = Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        };
        std::fs::create_dir_all(fixture.workspace()).expect("Failed to create workspace");
        fixture
    }

    /// Registry home.
    pub fn home(&self) -> PathBuf {
        self.temp_dir.path().join("home")
    }

    /// Root of the build node.
    pub fn node_root(&self) -> PathBuf {
        self.temp_dir.path().join("node")
    }

    /// Layout working tree.
    pub fn workspace(&self) -> PathBuf {
        self.node_root().join("workspace").join(LAYOUT)
    }

    /// Write a `module.yaml` under `dir`, relative to the layout working tree.
    pub fn with_descriptor(self, dir: &str, artifact: &str, modules: &[&str]) -> Self {
        let mut yaml = format!("group-id: com.example\nartifact-id: {}\n", artifact);
        if !modules.is_empty() {
            yaml.push_str("modules:\n");
            for module in modules {
                yaml.push_str(&format!("  - {}\n", module));
            }
        }
        self.temp_dir
            .child(format!("node/workspace/{}/{}/module.yaml", LAYOUT, dir).replace("//", "/"))
            .write_str(&yaml)
            .expect("Failed to write module descriptor");
        self
    }

    /// Register a project with a raw configuration document.
    pub fn with_project(self, name: &str, config: &str) -> Self {
        self.temp_dir
            .child(format!("home/jobs/{}/config.yaml", name))
            .write_str(config)
            .expect("Failed to write project config");
        self
    }

    /// A git layout with flat submodules and their descriptors on disk.
    pub fn with_layout(self, modules: &[&str]) -> Self {
        self.with_layout_config(configs::GIT_LAYOUT, modules)
    }

    pub fn with_layout_config(self, config: &str, modules: &[&str]) -> Self {
        let mut fixture = self
            .with_project(LAYOUT, config)
            .with_descriptor("", LAYOUT, modules);
        for module in modules {
            fixture = fixture.with_descriptor(module, module, &[]);
        }
        fixture
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// CLI command bound to this fixture's registry home, without colors.
    #[allow(dead_code)]
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("layout-cascade");
        cmd.current_dir(self.path())
            .env_remove("LAYOUT_CASCADE_HOME")
            .arg("--home")
            .arg(self.home())
            .arg("--color")
            .arg("never");
        cmd
    }

    /// `reconcile` command for the fixture layout.
    #[allow(dead_code)]
    pub fn reconcile(&self, action: &str) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("reconcile")
            .arg(LAYOUT)
            .arg("--action")
            .arg(action)
            .arg("--workspace")
            .arg(self.workspace())
            .arg("--node-root")
            .arg(self.node_root());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_layout_files() {
        let fixture = TestFixture::new().with_layout(&["core"]);
        assert!(fixture.home().join("jobs/layout/config.yaml").is_file());
        assert!(fixture.workspace().join("module.yaml").is_file());
        assert!(fixture.workspace().join("core/module.yaml").is_file());
    }

    #[test]
    fn test_configs_parse() {
        for config in [configs::GIT_LAYOUT, configs::SVN_LAYOUT, configs::QUIET_LAYOUT] {
            let parsed = layout_cascade::config::parse(config).unwrap();
            assert!(parsed.layout_options().is_some());
        }
    }
}
