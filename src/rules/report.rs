// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Lint result types.

use console::{style, Style};
use serde::Serialize;

use super::builtin::RuleName;
use super::setting::Severity;

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintIssue {
    /// Rule that failed.
    pub rule: RuleName,
    /// Configured severity of the rule.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
}

impl LintIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Format the issue for terminal output.
    pub fn format(&self) -> String {
        let (prefix, code_style) = if self.is_error() {
            (style("✗").red().bold(), Style::new().red())
        } else {
            (style("⚠").yellow().bold(), Style::new().yellow())
        };

        format!(
            "{} {} [{}]",
            prefix,
            self.message,
            code_style.apply_to(self.rule.as_str())
        )
    }
}

/// Result of linting one commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintReport {
    /// The original message.
    pub input: String,
    /// Commit SHA if linting an existing commit.
    pub commit_sha: Option<String>,
    /// Whether the message matched an ignore pattern and was not linted.
    pub ignored: bool,
    /// Violations in rule evaluation order.
    pub issues: Vec<LintIssue>,
}

impl LintReport {
    /// Create an empty report.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            commit_sha: None,
            ignored: false,
            issues: Vec::new(),
        }
    }

    /// Create a report for a message that was skipped.
    pub fn ignored(input: impl Into<String>) -> Self {
        Self {
            ignored: true,
            ..Self::new(input)
        }
    }

    /// Check if the message passed (no error-severity issues).
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(LintIssue::is_error)
    }

    /// Pass/fail with warnings optionally counted as failures.
    pub fn passes(&self, strict: bool) -> bool {
        if strict {
            self.issues.is_empty()
        } else {
            self.is_valid()
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &LintIssue> {
        self.issues.iter().filter(|issue| issue.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &LintIssue> {
        self.issues.iter().filter(|issue| !issue.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Render in text format.
    pub fn render_text(&self) -> String {
        let mut output = String::new();

        let status = if self.ignored {
            style("-").dim()
        } else if self.is_valid() {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };
        let first_line = self.input.lines().next().unwrap_or("");
        match self.commit_sha {
            Some(ref sha) => {
                let short_sha = &sha[..7.min(sha.len())];
                output.push_str(&format!(
                    "{} {} {}\n",
                    status,
                    style(short_sha).cyan(),
                    first_line
                ));
            }
            None => output.push_str(&format!("{} {}\n", status, first_line)),
        }

        for issue in &self.issues {
            output.push_str(&format!("  {}\n", issue.format()));
        }

        output
    }

    /// Render as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "ignored": self.ignored,
            "commit": self.commit_sha,
            "input": self.input,
            "errors": self.error_count(),
            "warnings": self.warning_count(),
            "issues": self.issues,
        })
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.ignored {
            "Ignored".to_string()
        } else if self.is_valid() {
            match self.warning_count() {
                0 => "Valid".to_string(),
                n => format!("Valid ({} warnings)", n),
            }
        } else {
            format!(
                "Invalid ({} errors, {} warnings)",
                self.error_count(),
                self.warning_count()
            )
        }
    }
}
