// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for cmlint.
//!
//! Rule violations are not errors: they are data carried by a
//! [`LintReport`](crate::rules::LintReport). The types here cover the
//! things that stop a run before or around linting.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for cmlint operations.
#[derive(Error, Debug)]
pub enum LintError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // Lint verdict
    #[error("Lint failed: {0}")]
    Lint(#[from] LintFailure),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
///
/// All of these are raised while loading, before any message is linted.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Unknown rule: '{name}'")]
    UnknownRule { name: String },

    #[error("Invalid severity for rule '{rule}': {value} (expected 0, 1 or 2)")]
    InvalidSeverity { rule: String, value: i64 },

    #[error("Malformed setting for rule '{rule}': {message}")]
    MalformedRule { rule: String, message: String },

    #[error("Unknown preset: '{name}'")]
    UnknownPreset { name: String },

    #[error("Circular extends: {path}")]
    ExtendsCycle { path: PathBuf },

    #[error("Invalid ignore pattern '{pattern}': {message}")]
    InvalidIgnore { pattern: String, message: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Invalid commit reference: {reference}")]
    InvalidReference { reference: String },

    #[error("Git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::OpenFailed {
            message: err.message().to_string(),
        }
    }
}

/// A failing verdict, surfaced as an error so the binary exits non-zero.
#[derive(Error, Debug)]
pub enum LintFailure {
    #[error("{errors} errors, {warnings} warnings")]
    Failed { errors: usize, warnings: usize },
}

/// Result type alias for cmlint operations.
pub type Result<T> = std::result::Result<T, LintError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| LintError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/path/to/cmlint.toml"),
        };
        assert!(err.to_string().contains("/path/to/cmlint.toml"));
    }

    #[test]
    fn test_invalid_severity_display() {
        let err = ConfigError::InvalidSeverity {
            rule: "type-enum".to_string(),
            value: 3,
        };
        let text = err.to_string();
        assert!(text.contains("type-enum"));
        assert!(text.contains('3'));
    }

    #[test]
    fn test_lint_error_from_config_error() {
        let config_err = ConfigError::UnknownRule {
            name: "type-emun".to_string(),
        };
        let err: LintError = config_err.into();
        assert!(err.to_string().contains("type-emun"));
    }

    #[test]
    fn test_lint_failure_display() {
        let err: LintError = LintFailure::Failed {
            errors: 2,
            warnings: 1,
        }
        .into();
        assert_eq!(err.to_string(), "Lint failed: 2 errors, 1 warnings");
    }

    #[test]
    fn test_result_ext_context() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = res.context("read message").unwrap_err();
        assert_eq!(err.to_string(), "read message: missing");
    }
}
