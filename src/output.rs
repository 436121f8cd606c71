//! # Output Configuration
//!
//! Controls how the CLI decorates its own output (status markers and role
//! colors). The build log itself is never decorated: it is written by
//! [`crate::logger::BuildLogger`] exactly as a build host would store it.
//!
//! Color is decided from the `--color=never|always|auto` flag first, then
//! from the environment in auto mode: `NO_COLOR`, `CLICOLOR=0`,
//! `CLICOLOR_FORCE=1`, `TERM=dumb`, and finally whether stdout is a terminal.

use std::env;

use console::Style;

use crate::identity::Role;

#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };
        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }

    /// Render a family role, colored per role when colors are on.
    pub fn role(&self, role: Role) -> String {
        if !self.use_color {
            return role.to_string();
        }
        let style = match role {
            Role::Layout => Style::new().cyan().bold(),
            Role::Cascade => Style::new().magenta(),
            Role::Member => Style::new().green(),
        };
        style.force_styling(true).apply_to(role).to_string()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// `emoji_str` when colors are enabled, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}
