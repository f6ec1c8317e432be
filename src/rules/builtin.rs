// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::commit::CommitMessage;

use super::case::CaseStyle;
use super::setting::{Applicability, Condition, RuleParams, RuleValue};

/// Line length applied by length rules configured without a value.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 100;

/// Case styles checked by `subject-case` when none are configured.
const DEFAULT_SUBJECT_CASES: [CaseStyle; 2] = [CaseStyle::LowerCase, CaseStyle::SentenceCase];

/// Names of the built-in rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleName {
    TypeEnum,
    TypeCase,
    TypeEmpty,
    ScopeEnum,
    ScopeCase,
    ScopeEmpty,
    SubjectCase,
    SubjectEmpty,
    SubjectFullStop,
    SubjectMaxLength,
    SubjectMinLength,
    HeaderMaxLength,
    HeaderMinLength,
    HeaderTrim,
    BodyLeadingBlank,
    BodyEmpty,
    BodyMaxLineLength,
    BodyMinLength,
    FooterLeadingBlank,
    FooterEmpty,
    FooterMaxLineLength,
}

impl RuleName {
    pub const ALL: [RuleName; 21] = [
        RuleName::TypeEnum,
        RuleName::TypeCase,
        RuleName::TypeEmpty,
        RuleName::ScopeEnum,
        RuleName::ScopeCase,
        RuleName::ScopeEmpty,
        RuleName::SubjectCase,
        RuleName::SubjectEmpty,
        RuleName::SubjectFullStop,
        RuleName::SubjectMaxLength,
        RuleName::SubjectMinLength,
        RuleName::HeaderMaxLength,
        RuleName::HeaderMinLength,
        RuleName::HeaderTrim,
        RuleName::BodyLeadingBlank,
        RuleName::BodyEmpty,
        RuleName::BodyMaxLineLength,
        RuleName::BodyMinLength,
        RuleName::FooterLeadingBlank,
        RuleName::FooterEmpty,
        RuleName::FooterMaxLineLength,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleName::TypeEnum => "type-enum",
            RuleName::TypeCase => "type-case",
            RuleName::TypeEmpty => "type-empty",
            RuleName::ScopeEnum => "scope-enum",
            RuleName::ScopeCase => "scope-case",
            RuleName::ScopeEmpty => "scope-empty",
            RuleName::SubjectCase => "subject-case",
            RuleName::SubjectEmpty => "subject-empty",
            RuleName::SubjectFullStop => "subject-full-stop",
            RuleName::SubjectMaxLength => "subject-max-length",
            RuleName::SubjectMinLength => "subject-min-length",
            RuleName::HeaderMaxLength => "header-max-length",
            RuleName::HeaderMinLength => "header-min-length",
            RuleName::HeaderTrim => "header-trim",
            RuleName::BodyLeadingBlank => "body-leading-blank",
            RuleName::BodyEmpty => "body-empty",
            RuleName::BodyMaxLineLength => "body-max-line-length",
            RuleName::BodyMinLength => "body-min-length",
            RuleName::FooterLeadingBlank => "footer-leading-blank",
            RuleName::FooterEmpty => "footer-empty",
            RuleName::FooterMaxLineLength => "footer-max-line-length",
        }
    }

    /// Validate the third element of a rule array for this rule.
    pub fn parse_params(&self, value: Option<&RuleValue>) -> Result<RuleParams, String> {
        match self {
            RuleName::TypeEnum | RuleName::ScopeEnum => match value {
                Some(RuleValue::List(values)) => Ok(RuleParams::Values(values.clone())),
                Some(other) => Err(format!("expected a list of values, got {}", other)),
                None => Err("missing list of allowed values".to_string()),
            },
            RuleName::TypeCase | RuleName::ScopeCase => match value {
                None => Err("missing case style".to_string()),
                Some(value) => parse_cases(value).map(RuleParams::Cases),
            },
            RuleName::SubjectCase => match value {
                None => Ok(RuleParams::Cases(DEFAULT_SUBJECT_CASES.to_vec())),
                Some(value) => parse_cases(value).map(RuleParams::Cases),
            },
            RuleName::SubjectFullStop => match value {
                None => Ok(RuleParams::Text(".".to_string())),
                Some(RuleValue::Text(stop)) => Ok(RuleParams::Text(stop.clone())),
                Some(other) => Err(format!("expected a string, got {}", other)),
            },
            RuleName::SubjectMaxLength
            | RuleName::HeaderMaxLength
            | RuleName::BodyMaxLineLength
            | RuleName::FooterMaxLineLength => match value {
                None => Ok(RuleParams::Length(DEFAULT_MAX_LINE_LENGTH)),
                Some(value) => parse_length(value).map(RuleParams::Length),
            },
            RuleName::SubjectMinLength | RuleName::HeaderMinLength | RuleName::BodyMinLength => {
                match value {
                    None => Err("missing minimum length".to_string()),
                    Some(value) => parse_length(value).map(RuleParams::Length),
                }
            }
            RuleName::TypeEmpty
            | RuleName::ScopeEmpty
            | RuleName::SubjectEmpty
            | RuleName::HeaderTrim
            | RuleName::BodyLeadingBlank
            | RuleName::BodyEmpty
            | RuleName::FooterLeadingBlank
            | RuleName::FooterEmpty => match value {
                None => Ok(RuleParams::None),
                Some(other) => Err(format!("takes no value, got {}", other)),
            },
        }
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleName::ALL
            .iter()
            .copied()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

fn parse_cases(value: &RuleValue) -> Result<Vec<CaseStyle>, String> {
    match value {
        RuleValue::Text(style) => Ok(vec![style.parse()?]),
        RuleValue::List(styles) if !styles.is_empty() => {
            styles.iter().map(|style| style.parse()).collect()
        }
        other => Err(format!("expected a case style or list of case styles, got {}", other)),
    }
}

fn parse_length(value: &RuleValue) -> Result<usize, String> {
    match value {
        RuleValue::Integer(n) if *n >= 0 => Ok(*n as usize),
        other => Err(format!("expected a non-negative length, got {}", other)),
    }
}

/// Check one rule. Returns a message describing the violation, if any.
pub fn check_rule(rule: RuleName, condition: &Condition, message: &CommitMessage) -> Option<String> {
    let when = condition.applicability;
    let params = &condition.params;

    match rule {
        RuleName::TypeEnum => check_enum("type", &[message.commit_type.as_str()], params, when),
        RuleName::TypeCase => check_case("type", &[message.commit_type.as_str()], params, when),
        RuleName::TypeEmpty => check_empty("type", &message.commit_type, when),
        RuleName::ScopeEnum => {
            let scopes = message.scopes();
            if scopes.is_empty() {
                return None;
            }
            check_enum("scope", &scopes, params, when)
        }
        RuleName::ScopeCase => check_case("scope", &message.scopes(), params, when),
        RuleName::ScopeEmpty => {
            check_empty("scope", message.scope.as_deref().unwrap_or(""), when)
        }
        RuleName::SubjectCase => check_subject_case(message, params, when),
        RuleName::SubjectEmpty => check_empty("subject", &message.subject, when),
        RuleName::SubjectFullStop => check_full_stop(message, params, when),
        RuleName::SubjectMaxLength => check_max_length("subject", &message.subject, params, when),
        RuleName::SubjectMinLength => check_min_length("subject", &message.subject, params, when),
        RuleName::HeaderMaxLength => check_max_length("header", &message.header, params, when),
        RuleName::HeaderMinLength => check_min_length("header", &message.header, params, when),
        RuleName::HeaderTrim => verdict(
            "header",
            when,
            message.header == message.header.trim(),
            "have no leading or trailing whitespace".to_string(),
            None,
        ),
        RuleName::BodyLeadingBlank => {
            if !message.has_body() {
                return None;
            }
            verdict(
                "body",
                when,
                message.body_leading_blank,
                "begin with a blank line".to_string(),
                None,
            )
        }
        RuleName::BodyEmpty => check_empty("body", &message.body, when),
        RuleName::BodyMaxLineLength => {
            check_max_line_length("body", &message.body, params, when)
        }
        RuleName::BodyMinLength => {
            if !message.has_body() {
                return None;
            }
            check_min_length("body", &message.body, params, when)
        }
        RuleName::FooterLeadingBlank => {
            if !message.has_footer() {
                return None;
            }
            verdict(
                "footer",
                when,
                message.footer_leading_blank,
                "begin with a blank line".to_string(),
                None,
            )
        }
        RuleName::FooterEmpty => check_empty("footer", &message.footer, when),
        RuleName::FooterMaxLineLength => {
            check_max_line_length("footer", &message.footer, params, when)
        }
    }
}

/// Turn a condition outcome into a violation message.
///
/// `holds` is whether the positive form of `expectation` is true for the
/// message; `never` inverts it.
fn verdict(
    field: &str,
    when: Applicability,
    holds: bool,
    expectation: String,
    found: Option<String>,
) -> Option<String> {
    let negated = when == Applicability::Never;
    if holds != negated {
        return None;
    }

    let must = if negated { "must not" } else { "must" };
    Some(match found {
        Some(found) => format!("{} {} {} (found {})", field, must, expectation, found),
        None => format!("{} {} {}", field, must, expectation),
    })
}

fn check_enum(
    field: &str,
    values: &[&str],
    params: &RuleParams,
    when: Applicability,
) -> Option<String> {
    let RuleParams::Values(allowed) = params else {
        return None;
    };

    let outside: Vec<&str> = values
        .iter()
        .copied()
        .filter(|value| !allowed.iter().any(|a| a.as_str() == *value))
        .collect();
    let holds = outside.is_empty();

    // Report the offending values when a required set is violated
    let found = if holds { values.to_vec() } else { outside };
    verdict(
        field,
        when,
        holds,
        format!("be one of [{}]", allowed.join(", ")),
        Some(quote_all(&found)),
    )
}

fn check_case(
    field: &str,
    values: &[&str],
    params: &RuleParams,
    when: Applicability,
) -> Option<String> {
    let RuleParams::Cases(cases) = params else {
        return None;
    };

    let values: Vec<&str> = values.iter().copied().filter(|v| !v.is_empty()).collect();
    if values.is_empty() {
        return None;
    }

    let holds = values
        .iter()
        .all(|value| cases.iter().any(|case| case.matches(value)));
    verdict(
        field,
        when,
        holds,
        format!("be {}", join_cases(cases)),
        Some(quote_all(&values)),
    )
}

fn check_subject_case(
    message: &CommitMessage,
    params: &RuleParams,
    when: Applicability,
) -> Option<String> {
    let RuleParams::Cases(cases) = params else {
        return None;
    };

    // Words without letters (versions, numbers) carry no case
    let word = message.subject.split_whitespace().next()?;
    if !word.chars().any(char::is_alphabetic) {
        return None;
    }

    let holds = cases.iter().any(|case| case.matches(word));
    verdict(
        "subject",
        when,
        holds,
        format!("start with a {} word", join_cases(cases)),
        Some(format!("'{}'", word)),
    )
}

fn check_empty(field: &str, value: &str, when: Applicability) -> Option<String> {
    verdict(field, when, value.trim().is_empty(), "be empty".to_string(), None)
}

fn check_full_stop(
    message: &CommitMessage,
    params: &RuleParams,
    when: Applicability,
) -> Option<String> {
    let RuleParams::Text(stop) = params else {
        return None;
    };
    if message.subject.is_empty() {
        return None;
    }

    verdict(
        "subject",
        when,
        message.subject.ends_with(stop.as_str()),
        format!("end with '{}'", stop),
        None,
    )
}

fn check_max_length(
    field: &str,
    value: &str,
    params: &RuleParams,
    when: Applicability,
) -> Option<String> {
    let RuleParams::Length(max) = params else {
        return None;
    };

    let len = value.chars().count();
    verdict(
        field,
        when,
        len <= *max,
        format!("be at most {} characters", max),
        Some(format!("{} characters", len)),
    )
}

fn check_min_length(
    field: &str,
    value: &str,
    params: &RuleParams,
    when: Applicability,
) -> Option<String> {
    let RuleParams::Length(min) = params else {
        return None;
    };

    let len = value.chars().count();
    verdict(
        field,
        when,
        len >= *min,
        format!("be at least {} characters", min),
        Some(format!("{} characters", len)),
    )
}

fn check_max_line_length(
    field: &str,
    text: &str,
    params: &RuleParams,
    when: Applicability,
) -> Option<String> {
    let RuleParams::Length(max) = params else {
        return None;
    };

    let (line_no, longest) = text
        .lines()
        .map(|line| line.chars().count())
        .enumerate()
        .max_by_key(|&(_, len)| len)?;

    verdict(
        field,
        when,
        longest <= *max,
        format!("have lines of at most {} characters", max),
        Some(format!("{} characters on line {}", longest, line_no + 1)),
    )
}

fn join_cases(cases: &[CaseStyle]) -> String {
    cases
        .iter()
        .map(CaseStyle::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn quote_all(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v))
        .collect::<Vec<_>>()
        .join(", ")
}
