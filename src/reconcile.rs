//! # Family Reconciliation
//!
//! Entry point of a layout build. Given the requested [`ConfigAction`] it
//! brings the cascade project and the member projects of the layout's family
//! in line with the layout:
//!
//! 1. structural validation of the module nesting;
//! 2. the family view;
//! 3. normalization of the layout's own SCM and checkout settings;
//! 4. the cascade project;
//! 5. the member projects.
//!
//! Creation is keyed by resolved project name, so repeating a `create` is a
//! no-op. Update and delete are keyed by family identity, so renamed projects
//! are still found. Members whose module left the layout are never removed
//! implicitly; only a family `delete` removes members.

use std::fmt;

use log::debug;

use crate::actions::BuildAction;
use crate::config::ProjectKind;
use crate::context::BuildContext;
use crate::error::Result;
use crate::identity;
use crate::member::{generated_description, sync_member, validate_member};
use crate::naming::{cascade_name, member_name};
use crate::nesting::check_module_nesting;
use crate::registry::Project;
use crate::scm::{use_cascade_checkout, ScopeChange};
use crate::view::ensure_project_view;

/// Requested family transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    Create,
    Update,
    Delete,
    /// Anything else; logged and ignored.
    Unknown(String),
}

impl From<&str> for ConfigAction {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "CREATE" => ConfigAction::Create,
            "UPDATE" => ConfigAction::Update,
            "DELETE" => ConfigAction::Delete,
            _ => ConfigAction::Unknown(value.to_string()),
        }
    }
}

impl fmt::Display for ConfigAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigAction::Create => write!(f, "CREATE"),
            ConfigAction::Update => write!(f, "UPDATE"),
            ConfigAction::Delete => write!(f, "DELETE"),
            ConfigAction::Unknown(value) => write!(f, "{}", value),
        }
    }
}

/// Reconcile the family of `layout`.
///
/// Returns `false` when the layout fails structural validation, or when a
/// member `delete`/`update` finds no members in the family. Per-member delete
/// failures are logged and do not change the result.
pub fn process(context: &BuildContext, layout: &mut Project, action: &ConfigAction) -> Result<bool> {
    if context.build.has_action(&BuildAction::LayoutLogic) {
        context.log("Layout validation build, skip layout logic.");
        return Ok(true);
    }

    let layout_identity = identity::ensure_layout_identity(layout);
    context.host.registry.save(layout)?;

    context.log("");
    context.log(&format!("Layout build: #{}", context.build.number));
    context.log(&format!("Layout action: {}", action));
    context.log(&format!("Layout project: {}", layout.name));
    context.log(&format!("Project identity: {}", layout_identity));

    if !check_module_nesting(context, layout)? {
        return Ok(false);
    }

    ensure_project_view(context, layout)?;

    process_layout(context, layout)?;

    process_cascade(context, layout, action)?;

    process_member_list(context, layout, action)
}

/// Normalize the layout's own settings and persist them, so that clones taken
/// from its configuration file see the normalized state.
pub fn process_layout(context: &BuildContext, layout: &mut Project) -> Result<()> {
    context.log_tab("Update SCM settings.");
    match layout.config.scm.disable_polling(&layout.name)? {
        ScopeChange::Applied(pattern) => {
            debug!("Layout {} included regions set to {}", layout.name, pattern);
        }
        ScopeChange::FieldUnavailable(e) => {
            debug!("{}", e);
            context.log_tab("Assuming repository polling trigger is disabled.");
        }
        ScopeChange::Unimplemented => {
            log::warn!("Subversion polling cannot be disabled: {}", layout.name);
            context.log_tab("Subversion polling cannot be disabled, trigger stays active.");
        }
    }

    context.log_tab("Use custom checkout strategy.");
    use_cascade_checkout(&mut layout.config);

    context.host.registry.save(layout)
}

/// Create, update or delete the cascade project of the family.
pub fn process_cascade(context: &BuildContext, layout: &Project, action: &ConfigAction) -> Result<()> {
    let cascade = cascade_name(context, layout)?;

    context.log("");
    context.log(&format!("Layout project: {}", layout.name));
    context.log(&format!("Cascade project: {}", cascade));

    match action {
        ConfigAction::Create => cascade_create(context, layout, &cascade),
        ConfigAction::Delete => cascade_delete(context, layout),
        ConfigAction::Update => {
            let family_id = identity::family_id(layout)?;
            match identity::cascade_project(context.host.registry, family_id)? {
                None => {
                    context.log_tab("Project missing, creating now.");
                    cascade_create(context, layout, &cascade)
                }
                Some(project) => {
                    context.log_tab("Project present, updating now.");
                    cascade_update(context, &project)
                }
            }
        }
        ConfigAction::Unknown(value) => {
            context.log_err(&format!("Unexpected config action, ignore: {}", value));
            Ok(())
        }
    }
}

fn cascade_create(context: &BuildContext, layout: &Project, cascade: &str) -> Result<()> {
    let registry = context.host.registry;
    if registry.exists(cascade)? {
        context.log_err("Cascade project exist, skip create.");
        return Ok(());
    }
    let family_id = identity::family_id(layout)?;
    if let Some(existing) = identity::cascade_project(registry, family_id)? {
        context.log_err(&format!(
            "Family already has a cascade project, skip create: {}",
            existing.name
        ));
        return Ok(());
    }

    context.log_tab("Creating cascade project.");
    let mut project = registry.create(ProjectKind::Cascade, cascade)?;

    let cascade_identity = identity::ensure_cascade_identity(layout, &mut project)?;
    context.log_tab(&format!("Project identity: {}", cascade_identity));

    context.log_tab("Provide description.");
    project.config.description = generated_description();

    context.log_tab("Persist project.");
    registry.save(&project)?;

    ensure_project_view(context, &project)?;

    context.log_tab("Project created.");
    Ok(())
}

fn cascade_delete(context: &BuildContext, layout: &Project) -> Result<()> {
    let family_id = identity::family_id(layout)?;
    let Some(project) = identity::cascade_project(context.host.registry, family_id)? else {
        context.log_err("Cascade project missing, skip delete.");
        return Ok(());
    };

    context.log_tab(&format!("Project identity: {}", identity::identity(&project)?));
    context.log_tab("Deleting cascade project.");
    match context.host.registry.delete(&project) {
        Ok(()) => context.log_tab("Project deleted."),
        Err(e) => {
            context.log_exc(&e);
            context.log_err("Failed to delete cascade project.");
        }
    }
    Ok(())
}

// Only re-persists the cascade; its configuration is not cloned again from
// the layout after creation.
fn cascade_update(context: &BuildContext, project: &Project) -> Result<()> {
    context.log_tab(&format!("Project identity: {}", identity::identity(project)?));
    context.log_tab("Updating cascade project.");

    context.log_tab("Persist project.");
    context.host.registry.save(project)?;

    ensure_project_view(context, project)?;

    context.log_tab("Project updated.");
    Ok(())
}

/// Create, update or delete the member projects of the family.
pub fn process_member_list(
    context: &BuildContext,
    layout: &Project,
    action: &ConfigAction,
) -> Result<bool> {
    match action {
        ConfigAction::Create => member_list_create(context, layout),
        ConfigAction::Delete => member_list_delete(context, layout),
        ConfigAction::Update => member_list_update(context, layout),
        ConfigAction::Unknown(value) => {
            context.log_err(&format!("Unexpected config action, ignore: {}", value));
            Ok(true)
        }
    }
}

fn member_list_create(context: &BuildContext, layout: &Project) -> Result<bool> {
    let registry = context.host.registry;

    for module in &layout.config.modules {
        let name = member_name(context, module)?;

        context.log("");
        context.log(&format!("Module name: {}", module.name));
        context.log(&format!("Member project: {}", name));

        if layout.config.is_root_module(module) {
            context.log_tab("This is a layout module project, managed by user, skip.");
            continue;
        }

        if registry.exists(&name)? {
            context.log_err(&format!("Project exists, create skipped: {}", name));
            continue;
        }

        context.log_tab(&format!("Creating project: {}", name));
        let mut member = registry.copy(layout, &name)?;

        sync_member(context, layout, module, &mut member)?;
        validate_member(context, &member)?;
        ensure_project_view(context, &member)?;

        context.log_tab(&format!("Project created: {}", name));
    }

    Ok(true)
}

fn member_list_delete(context: &BuildContext, layout: &Project) -> Result<bool> {
    let family_id = identity::family_id(layout)?;
    let members = identity::member_project_list(context.host.registry, family_id)?;

    if members.is_empty() {
        context.log_err(&format!("No member projects in the family: {}", family_id));
        return Ok(false);
    }

    for member in &members {
        context.log("");
        context.log(&format!("Member project: {}", member.name));
        context.log_tab(&format!("Project identity: {}", identity::identity(member)?));
        context.log_tab("Deleting project.");

        match context.host.registry.delete(member) {
            Ok(()) => context.log_tab("Project deleted."),
            Err(e) => {
                context.log_exc(&e);
                context.log_err("Failed to delete project.");
            }
        }
    }

    Ok(true)
}

fn member_list_update(context: &BuildContext, layout: &Project) -> Result<bool> {
    let family_id = identity::family_id(layout)?;
    let members = identity::member_project_list(context.host.registry, family_id)?;

    if members.is_empty() {
        context.log_err(&format!("No member projects in the family: {}", family_id));
        return Ok(false);
    }

    for mut member in members {
        context.log("");
        context.log(&format!("Member project: {}", member.name));
        context.log_tab(&format!("Project identity: {}", identity::identity(&member)?));
        context.log_tab("Updating project.");

        let Some(module_name) = member.config.root_module.clone() else {
            context.log_err("Member has no root module, skip update.");
            continue;
        };

        let Some(module) = layout
            .config
            .submodules()
            .find(|module| module.name == module_name)
        else {
            context.log_err(&format!("Missing layout module, skip update: {}", module_name));
            continue;
        };

        sync_member(context, layout, module, &mut member)?;
        validate_member(context, &member)?;
        ensure_project_view(context, &member)?;

        context.log_tab(&format!("Project updated: {}", module_name));
    }

    Ok(true)
}
