//! Name resolution for cascade and member projects.
//!
//! Both names come from templates in the layout options. Member names use
//! plain macro substitution over the module tokens and the build variables:
//! unresolved tokens stay in the name verbatim. Cascade names go through the
//! injected [`TemplateExpander`], which may fail.

use std::collections::HashMap;

use regex::{Captures, Regex};
use thiserror::Error;

use crate::config::{ModuleDecl, ModuleName};
use crate::context::BuildContext;
use crate::error::{Error, Result};
use crate::registry::Project;

pub const TOKEN_PROJECT_ID: &str = "PROJECT_ID";
pub const TOKEN_GROUP_ID: &str = "GROUP_ID";
pub const TOKEN_ARTIFACT_ID: &str = "ARTIFACT_ID";

/// `${NAME}` or `$NAME`.
const MACRO_PATTERN: &str = r"\$\{([A-Za-z0-9_.]+)\}|\$([A-Za-z0-9_]+)";

/// Lookup of template variables.
pub trait VariableResolver {
    fn resolve(&self, name: &str) -> Option<String>;
}

impl VariableResolver for HashMap<String, String> {
    fn resolve(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Resolvers consulted in order; the first answer wins.
pub struct Union<'a> {
    resolvers: Vec<&'a dyn VariableResolver>,
}

impl<'a> Union<'a> {
    pub fn new(resolvers: Vec<&'a dyn VariableResolver>) -> Self {
        Self { resolvers }
    }
}

impl VariableResolver for Union<'_> {
    fn resolve(&self, name: &str) -> Option<String> {
        self.resolvers
            .iter()
            .find_map(|resolver| resolver.resolve(name))
    }
}

/// Failure of a template expansion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpansionError {
    #[error("unknown token `{token}`")]
    UnknownToken { token: String },
    #[error("unterminated token in `{template}`")]
    Unterminated { template: String },
    #[error("invalid macro pattern: {message}")]
    Pattern { message: String },
}

/// Capability expanding a template against variables.
pub trait TemplateExpander {
    fn expand(
        &self,
        template: &str,
        variables: &dyn VariableResolver,
    ) -> std::result::Result<String, ExpansionError>;
}

/// Strict expander: every `${NAME}` must resolve and every `${` must close.
/// Bare `$NAME` tokens that do not resolve are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenMacroExpander;

impl TemplateExpander for TokenMacroExpander {
    fn expand(
        &self,
        template: &str,
        variables: &dyn VariableResolver,
    ) -> std::result::Result<String, ExpansionError> {
        let regex = Regex::new(MACRO_PATTERN).map_err(|e| ExpansionError::Pattern {
            message: e.to_string(),
        })?;

        let braced = regex
            .captures_iter(template)
            .filter(|caps| caps.get(1).is_some())
            .count();
        if template.matches("${").count() > braced {
            return Err(ExpansionError::Unterminated {
                template: template.to_string(),
            });
        }

        for caps in regex.captures_iter(template) {
            if let Some(name) = caps.get(1) {
                if variables.resolve(name.as_str()).is_none() {
                    return Err(ExpansionError::UnknownToken {
                        token: name.as_str().to_string(),
                    });
                }
            }
        }

        Ok(substitute(&regex, template, variables))
    }
}

fn substitute(regex: &Regex, template: &str, variables: &dyn VariableResolver) -> String {
    regex
        .replace_all(template, |caps: &Captures| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            variables
                .resolve(name)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Literal macro substitution; unresolved tokens are left as written.
pub fn replace_macro(template: &str, variables: &dyn VariableResolver) -> Result<String> {
    let regex = Regex::new(MACRO_PATTERN).map_err(Error::Regex)?;
    Ok(substitute(&regex, template, variables))
}

/// Tokens describing a module.
pub fn module_tokens(name: &ModuleName) -> HashMap<String, String> {
    HashMap::from([
        (TOKEN_PROJECT_ID.to_string(), name.to_string()),
        (TOKEN_GROUP_ID.to_string(), name.group_id.clone()),
        (TOKEN_ARTIFACT_ID.to_string(), name.artifact_id.clone()),
    ])
}

/// Name of the cascade project of `layout`.
pub fn cascade_name(context: &BuildContext, layout: &Project) -> Result<String> {
    let template = &context.options().cascade_project_name;
    let layout_tokens = layout
        .config
        .root_module
        .as_ref()
        .map(module_tokens)
        .unwrap_or_default();
    let variables = Union::new(vec![
        &layout_tokens as &dyn VariableResolver,
        &context.build.variables,
    ]);
    context
        .host
        .expander
        .expand(template, &variables)
        .map_err(|source| Error::TemplateExpansion {
            template: template.clone(),
            source,
        })
}

/// Name of the member project derived from `module`.
pub fn member_name(context: &BuildContext, module: &ModuleDecl) -> Result<String> {
    let tokens = module_tokens(&module.name);
    let variables = Union::new(vec![
        &tokens as &dyn VariableResolver,
        &context.build.variables,
    ]);
    replace_macro(&context.options().member_project_name, &variables)
}
