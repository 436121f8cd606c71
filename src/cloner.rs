//! Configuration cloning between projects.

use std::fs;

use crate::config;
use crate::error::{Error, Result};
use crate::registry::{Project, Registry};

/// Copy the persisted configuration of `source` over the configuration file
/// of `target`, then reload `target` from it.
///
/// `target` keeps its own name and parent: both are captured before the copy
/// and handed back to the post-load hook. Everything else, identity included,
/// is the source's until the caller strips it.
pub fn clone_config(registry: &dyn Registry, source: &Project, target: &mut Project) -> Result<()> {
    let parent = target.parent.clone();
    let name = target.name.clone();

    let source_file = registry.config_file(source);
    let target_file = registry.config_file(target);

    fs::copy(&source_file, &target_file).map_err(|e| Error::ConfigClone {
        path: source_file.clone(),
        source: e,
    })?;

    target.config = config::from_file(&target_file)?;
    target.on_load(parent, name);
    Ok(())
}
