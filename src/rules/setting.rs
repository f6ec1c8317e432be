// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Typed rule settings.
//!
//! Configuration files describe a rule as `[severity, applicability, value]`
//! with a variable number of elements. Those arrays are validated once, at
//! load time, into a [`RuleSetting`] so the engine never inspects raw values.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

use super::builtin::RuleName;
use super::case::CaseStyle;

/// How a failing rule is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    /// Numeric code used in configuration files.
    pub fn code(&self) -> i64 {
        match self {
            Severity::Warning => 1,
            Severity::Error => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Whether a rule's condition must hold or must not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    #[default]
    Always,
    Never,
}

impl Applicability {
    /// Configuration keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Applicability::Always => "always",
            Applicability::Never => "never",
        }
    }
}

impl FromStr for Applicability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Applicability::Always),
            "never" => Ok(Applicability::Never),
            other => Err(format!(
                "applicability must be \"always\" or \"never\", got \"{}\"",
                other
            )),
        }
    }
}

/// Rule-specific parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleParams {
    None,
    Values(Vec<String>),
    Cases(Vec<CaseStyle>),
    Length(usize),
    Text(String),
}

impl Serialize for RuleParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RuleParams::None => serializer.serialize_none(),
            RuleParams::Values(values) => values.serialize(serializer),
            RuleParams::Cases(cases) => cases.serialize(serializer),
            RuleParams::Length(len) => serializer.serialize_u64(*len as u64),
            RuleParams::Text(text) => serializer.serialize_str(text),
        }
    }
}

/// When a rule applies and with what parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub applicability: Applicability,
    pub params: RuleParams,
}

impl Condition {
    pub fn always(params: RuleParams) -> Self {
        Self {
            applicability: Applicability::Always,
            params,
        }
    }

    pub fn never(params: RuleParams) -> Self {
        Self {
            applicability: Applicability::Never,
            params,
        }
    }
}

/// One configured rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSetting {
    Off,
    Warning(Condition),
    Error(Condition),
}

impl RuleSetting {
    /// Severity of violations, `None` when the rule is off.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            RuleSetting::Off => None,
            RuleSetting::Warning(_) => Some(Severity::Warning),
            RuleSetting::Error(_) => Some(Severity::Error),
        }
    }

    /// Condition to evaluate, `None` when the rule is off.
    pub fn condition(&self) -> Option<&Condition> {
        match self {
            RuleSetting::Off => None,
            RuleSetting::Warning(condition) | RuleSetting::Error(condition) => Some(condition),
        }
    }

    pub fn is_off(&self) -> bool {
        matches!(self, RuleSetting::Off)
    }

    /// Validate a raw `[severity, applicability, value]` array for `rule`.
    pub fn from_values(rule: RuleName, values: &[RuleValue]) -> Result<Self, ConfigError> {
        let malformed = |message: String| ConfigError::MalformedRule {
            rule: rule.to_string(),
            message,
        };

        let code = match values.first() {
            Some(RuleValue::Integer(code)) => *code,
            Some(other) => {
                return Err(malformed(format!(
                    "severity must be 0, 1 or 2, got {}",
                    other
                )))
            }
            None => return Err(malformed("missing severity".to_string())),
        };

        match code {
            0 if values.len() == 1 => return Ok(RuleSetting::Off),
            0..=2 => {}
            value => {
                return Err(ConfigError::InvalidSeverity {
                    rule: rule.to_string(),
                    value,
                })
            }
        }

        if values.len() > 3 {
            return Err(malformed(format!(
                "expected at most 3 elements, got {}",
                values.len()
            )));
        }

        let applicability = match values.get(1) {
            None => Applicability::Always,
            Some(RuleValue::Text(keyword)) => keyword.parse().map_err(malformed)?,
            Some(other) => {
                return Err(malformed(format!(
                    "applicability must be \"always\" or \"never\", got {}",
                    other
                )))
            }
        };

        // Off rules carry no usable value, but their shape must still be valid.
        if code == 0 {
            return Ok(RuleSetting::Off);
        }

        let params = rule.parse_params(values.get(2)).map_err(malformed)?;
        let condition = Condition {
            applicability,
            params,
        };

        Ok(if code == 1 {
            RuleSetting::Warning(condition)
        } else {
            RuleSetting::Error(condition)
        })
    }
}

impl Serialize for RuleSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (severity, condition) = match (self.severity(), self.condition()) {
            (Some(severity), Some(condition)) => (severity, condition),
            _ => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(&0)?;
                return seq.end();
            }
        };

        let has_params = condition.params != RuleParams::None;
        let mut seq = serializer.serialize_seq(Some(if has_params { 3 } else { 2 }))?;
        seq.serialize_element(&severity.code())?;
        seq.serialize_element(condition.applicability.as_str())?;
        if has_params {
            seq.serialize_element(&condition.params)?;
        }
        seq.end()
    }
}

/// One element of a raw rule array, as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Integer(i64),
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleValue::Integer(n) => write!(f, "{}", n),
            RuleValue::Text(s) => write!(f, "\"{}\"", s),
            RuleValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// Ordered rule settings. Each rule appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleConfig {
    entries: Vec<(RuleName, RuleSetting)>,
}

impl RuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a rule. An existing entry is replaced in place; a new one is appended.
    pub fn set(&mut self, rule: RuleName, setting: RuleSetting) {
        match self.entries.iter_mut().find(|(name, _)| *name == rule) {
            Some(entry) => entry.1 = setting,
            None => self.entries.push((rule, setting)),
        }
    }

    /// Builder form of [`RuleConfig::set`].
    pub fn with(mut self, rule: RuleName, setting: RuleSetting) -> Self {
        self.set(rule, setting);
        self
    }

    pub fn get(&self, rule: RuleName) -> Option<&RuleSetting> {
        self.entries
            .iter()
            .find(|(name, _)| *name == rule)
            .map(|(_, setting)| setting)
    }

    /// Apply `overlay` on top of this configuration, entry by entry.
    pub fn merge(&mut self, overlay: RuleConfig) {
        for (rule, setting) in overlay.entries {
            self.set(rule, setting);
        }
    }

    /// Rules in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (RuleName, &RuleSetting)> {
        self.entries.iter().map(|(name, setting)| (*name, setting))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for RuleConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, setting) in &self.entries {
            map.serialize_entry(name.as_str(), setting)?;
        }
        map.end()
    }
}
