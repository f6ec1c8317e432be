// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit linting.
//!
//! Rules are configured as an ordered [`RuleConfig`] and evaluated in that
//! order by the [`RuleEngine`]. Each rule is independent of the others.

mod builtin;
mod case;
mod engine;
mod report;
mod setting;

pub use builtin::{check_rule, RuleName, DEFAULT_MAX_LINE_LENGTH};
pub use case::CaseStyle;
pub use engine::RuleEngine;
pub use report::{LintIssue, LintReport};
pub use setting::{
    Applicability, Condition, RuleConfig, RuleParams, RuleSetting, RuleValue, Severity,
};
