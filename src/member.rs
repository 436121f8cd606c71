//! Member project synchronization.
//!
//! A member is a clone of the layout narrowed down to one submodule: its
//! triggers, build root and workspace all point at that module, and it
//! carries a member identity instead of the layout's.

use std::path::Path;

use chrono::Utc;

use crate::actions::{maven_validate_goals, BuildAction};
use crate::cloner::clone_config;
use crate::config::{ModuleDecl, MODULE_DESCRIPTOR};
use crate::context::BuildContext;
use crate::error::Result;
use crate::identity;
use crate::registry::Project;
use crate::scm::{use_cascade_checkout, ScopeChange};

/// Description stamped on generated projects.
pub fn generated_description() -> String {
    format!("Generated on:<br>\n<b>{}</b><p>\n", Utc::now().to_rfc3339())
}

/// Workspace shared with the layout, as a path relative to the node root.
/// Falls back to the absolute workspace when it is not under the node root.
pub fn shared_workspace(workspace: &Path, node_root: &Path) -> String {
    match workspace.strip_prefix(node_root) {
        Ok(relative) => relative.to_string_lossy().replace('\\', "/"),
        Err(_) => workspace.to_string_lossy().into_owned(),
    }
}

/// Bring `member` in line with the layout and its `module`, then persist it.
pub fn sync_member(
    context: &BuildContext,
    layout: &Project,
    module: &ModuleDecl,
    member: &mut Project,
) -> Result<()> {
    context.log_tab("Clone config from layout into member.");
    clone_config(context.host.registry, layout, member)?;

    context.log_tab("Remove layout identity from the member.");
    member.config.identity = None;

    context.log_tab("Update member SCM settings.");
    match member.config.scm.restrict_scope(&member.name, &module.relative_path)? {
        ScopeChange::Applied(pattern) => {
            context.log_tab(&format!("Included regions: {}", pattern));
        }
        ScopeChange::FieldUnavailable(e) => {
            context.log_err(&format!("{}.", e));
            context.log_err("You need to configure included regions/repository polling manually.");
        }
        ScopeChange::Unimplemented => {
            log::warn!("Subversion trigger scoping is not implemented: {}", member.name);
            context.log_tab("Subversion trigger scoping is not implemented, polling stays unscoped.");
        }
    }

    context.log_tab("Update member maven setting.");
    {
        let root = module.relative_path.trim_matches('/');
        member.config.root_pom = if root.is_empty() {
            MODULE_DESCRIPTOR.to_string()
        } else {
            format!("{}/{}", root, MODULE_DESCRIPTOR)
        };
        member.config.root_module = Some(module.name.clone());
        member.config.modules.clear();

        if context.options().use_shared_workspace {
            let workspace = shared_workspace(&context.build.workspace, &context.build.node_root);
            member.config.custom_workspace = Some(workspace);
            context.log_tab("Member is sharing workspace with layout.");
        } else {
            member.config.custom_workspace = None;
            context.log_tab("Member is using its own private workspace.");
        }
    }

    context.log_tab("Configure member build wrappers.");
    member.config.remove_layout_wrapper();

    context.log_tab("Ensure member project identity.");
    let member_identity = identity::ensure_member_identity(layout, member)?;
    context.log_tab(&format!("Identity: {}", member_identity));

    context.log_tab("Provide member project description.");
    member.config.description = generated_description();

    context.log_tab("Use custom checkout strategy.");
    use_cascade_checkout(&mut member.config);

    context.log_tab("Persist project changes.");
    context.host.registry.save(member)
}

/// Schedule a metadata-only validation build of `member` when the layout asks
/// for it. Does not wait for the build.
pub fn validate_member(context: &BuildContext, member: &Project) -> Result<()> {
    context.log_tab(&format!(
        "Project: {}",
        context.host.registry.config_file(member).display()
    ));

    let options = context.options();
    if !options.build_after_layout {
        return Ok(());
    }

    let mut actions = maven_validate_goals(options, &[]);
    if options.use_shared_workspace {
        actions.push(BuildAction::CheckoutSkip);
    }
    actions.push(BuildAction::LayoutLogic);

    context
        .host
        .scheduler
        .schedule_build(member, 0, &context.build.cause, actions)?;
    context.log_tab("Building now.");
    Ok(())
}
