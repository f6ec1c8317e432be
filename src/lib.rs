// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! cmlint - Rule-based commit message linter
//!
//! Parses commit messages into header, body and footer, evaluates a
//! configurable set of rules against them and reports every violation.
//!
//! # Features
//!
//! - **Parser**: Total parsing of Conventional Commits style messages
//! - **Rule Engine**: 21 built-in rules, each off, warning or error
//! - **Configuration**: TOML or JSON files with presets and `extends`
//! - **Git Integration**: Lint `COMMIT_EDITMSG`, single commits or ranges
//!
//! # Example
//!
//! ```no_run
//! use cmlint::{LintConfig, RuleEngine};
//!
//! // Load configuration
//! let config = LintConfig::load().unwrap();
//!
//! // Lint a message
//! let engine = RuleEngine::from_config(&config).unwrap();
//! let report = engine.lint_str("feat(parser): add footer detection");
//!
//! if !report.is_valid() {
//!     print!("{}", report.render_text());
//! }
//! ```

// Module declarations
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod rules;

// Re-exports for convenience
pub use commit::CommitMessage;
pub use config::LintConfig;
pub use error::{LintError, Result};
pub use rules::{LintReport, RuleEngine};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of cmlint.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
