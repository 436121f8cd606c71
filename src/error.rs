//! # Error Handling
//!
//! This module defines the centralized error type for the `layout-cascade`
//! library. It uses the `thiserror` library to create an `Error` enum that
//! covers the failures which abort a reconciliation step, providing clear
//! and descriptive messages for the build log.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all fatal errors. Each variant
//!   carries enough context (project name, path, template) to be useful when
//!   printed as a single build log line.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! Degraded conditions that must not abort a run (a source-control field that
//! cannot be written, a member that fails to delete) are not represented here.
//! See [`crate::scm::FieldUnavailable`] for the typed, non-fatal case.

use std::path::PathBuf;

use thiserror::Error;

use crate::naming::ExpansionError;

/// Main error type for layout-cascade operations
#[derive(Error, Debug)]
pub enum Error {
    /// A project configuration or module descriptor could not be parsed.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A project carries no family identity where one is required.
    #[error("Project has no family identity: {project}")]
    MissingIdentity { project: String },

    /// The layout project has no layout build wrapper, so it carries no
    /// layout options.
    #[error("Project is not a layout project (no layout options): {project}")]
    MissingLayoutOptions { project: String },

    /// A name template could not be expanded.
    #[error("Template expansion error for `{template}`: {source}")]
    TemplateExpansion {
        template: String,
        #[source]
        source: ExpansionError,
    },

    /// The project uses a source-control binding this library cannot scope.
    #[error("Unsupported SCM `{kind}` on project {project}")]
    UnsupportedScm { project: String, kind: String },

    /// Copying or reloading a project configuration file failed.
    #[error("Configuration clone error for {}: {source}", path.display())]
    ConfigClone {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact registry refused or failed an operation.
    #[error("Registry error: {message}")]
    Registry { message: String },

    /// A named project does not exist in the registry.
    #[error("Project not found: {name}")]
    ProjectNotFound { name: String },

    /// A project exists but is of the wrong kind for the requested operation.
    #[error("Project is invalid: {name} - {message}")]
    InvalidProject { name: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON error from the build queue, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
