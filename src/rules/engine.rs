// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit message linting.

use crate::commit::{CommitMessage, Ignores};
use crate::config::LintConfig;
use crate::error::Result;
use crate::git;

use super::builtin::check_rule;
use super::report::{LintIssue, LintReport};
use super::setting::RuleConfig;

/// Rule engine for linting commit messages.
///
/// Linting is a pure function of the message and the configured rules.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    rules: RuleConfig,
    ignores: Ignores,
}

impl RuleEngine {
    /// Create a new rule engine with the given rules and no ignores.
    pub fn new(rules: RuleConfig) -> Self {
        Self {
            rules,
            ignores: Ignores::default(),
        }
    }

    /// Create a rule engine from a loaded configuration.
    pub fn from_config(config: &LintConfig) -> Result<Self> {
        let ignores = Ignores::new(config.default_ignores_enabled(), &config.ignores)?;
        Ok(Self::new(config.rules.clone()).with_ignores(ignores))
    }

    /// Replace the ignore matcher.
    pub fn with_ignores(mut self, ignores: Ignores) -> Self {
        self.ignores = ignores;
        self
    }

    /// The configured rules, in evaluation order.
    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    /// Lint a parsed commit message.
    pub fn lint(&self, message: &CommitMessage) -> LintReport {
        let mut report = LintReport::new(message.raw.as_str());

        for (rule, setting) in self.rules.iter() {
            let (Some(severity), Some(condition)) = (setting.severity(), setting.condition())
            else {
                continue;
            };

            if let Some(text) = check_rule(rule, condition, message) {
                report.issues.push(LintIssue {
                    rule,
                    severity,
                    message: text,
                });
            }
        }

        tracing::debug!(
            "Linted '{}': {} errors, {} warnings",
            message.header,
            report.error_count(),
            report.warning_count()
        );

        report
    }

    /// Lint a raw commit message string.
    pub fn lint_str(&self, raw: &str) -> LintReport {
        if self.ignores.is_ignored(raw) {
            tracing::debug!("Ignoring message: {:?}", raw.lines().next().unwrap_or(""));
            return LintReport::ignored(raw);
        }
        self.lint(&CommitMessage::parse(raw))
    }

    /// Lint a range of commits (`from..to`), or a single commit reference.
    pub fn lint_range(&self, range: &str) -> Result<Vec<LintReport>> {
        let commits = git::get_commit_range(range)?;

        Ok(commits
            .into_iter()
            .map(|(sha, message)| {
                let mut report = self.lint_str(&message);
                report.commit_sha = Some(sha);
                report
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Condition, RuleName, RuleParams, RuleSetting, Severity};

    /// The rules of a project that extends nothing and overrides four rules.
    fn observed_rules() -> RuleConfig {
        let types = [
            "feat", "fix", "docs", "style", "refactor", "perf", "test", "chore", "ci", "build",
            "revert",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        RuleConfig::new()
            .with(
                RuleName::TypeEnum,
                RuleSetting::Error(Condition::always(RuleParams::Values(types))),
            )
            .with(RuleName::SubjectCase, RuleSetting::Off)
            .with(
                RuleName::SubjectMaxLength,
                RuleSetting::Error(Condition::always(RuleParams::Length(100))),
            )
            .with(RuleName::BodyMaxLineLength, RuleSetting::Off)
    }

    fn engine() -> RuleEngine {
        RuleEngine::new(observed_rules())
    }

    #[test]
    fn test_valid_scoped_commit() {
        let report = engine().lint_str("feat(parser): support scoped commits\n\nThis body line is fine.");
        assert!(report.is_valid());
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_unknown_type() {
        let report = engine().lint_str("feature: add parser");
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].rule, RuleName::TypeEnum);
        assert_eq!(report.issues[0].severity, Severity::Error);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_missing_type() {
        let report = engine().lint_str("update stuff");
        assert!(!report.is_valid());
        assert!(report
            .errors()
            .any(|issue| issue.rule == RuleName::TypeEnum));
    }

    #[test]
    fn test_off_rules_never_reported() {
        let long_body = format!("fix: x\n\n{}", "b".repeat(500));
        for raw in ["feat: Add Parser", "feat: add parser", "feat: ADD PARSER", long_body.as_str()] {
            let report = engine().lint_str(raw);
            assert!(report.issues.is_empty(), "unexpected issues for {:?}", raw);
        }
    }

    #[test]
    fn test_subject_length_boundary() {
        let ok = engine().lint_str(&format!("feat: {}", "a".repeat(100)));
        assert!(ok.issues.is_empty());

        let long = engine().lint_str(&format!("feat: {}", "a".repeat(101)));
        assert_eq!(long.issues.len(), 1);
        assert_eq!(long.issues[0].rule, RuleName::SubjectMaxLength);
        assert_eq!(long.issues[0].severity, Severity::Error);
    }

    #[test]
    fn test_results_follow_rule_order() {
        let rules = RuleConfig::new()
            .with(
                RuleName::SubjectEmpty,
                RuleSetting::Warning(Condition::never(RuleParams::None)),
            )
            .with(
                RuleName::TypeEmpty,
                RuleSetting::Error(Condition::never(RuleParams::None)),
            );
        let report = RuleEngine::new(rules).lint_str("update stuff");

        let order: Vec<_> = report.issues.iter().map(|i| i.rule).collect();
        assert_eq!(order, vec![RuleName::SubjectEmpty, RuleName::TypeEmpty]);
    }

    #[test]
    fn test_lint_is_idempotent() {
        let engine = engine();
        let raw = "feature: something that is not allowed";
        assert_eq!(engine.lint_str(raw), engine.lint_str(raw));
    }

    #[test]
    fn test_ignored_message() {
        let engine = engine().with_ignores(Ignores::new(true, &[]).unwrap());
        let report = engine.lint_str("Merge branch 'main' into feature");
        assert!(report.ignored);
        assert!(report.is_valid());
    }
}
