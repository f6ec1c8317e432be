// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! [`ConfigFile`] is what a single file on disk says. [`LintConfig`] is the
//! result of resolving its `extends` chain and validating every rule.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::rules::{RuleConfig, RuleValue};

/// One configuration file, as written.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Presets or files whose rules this file overrides, applied in order.
    pub extends: Vec<String>,

    /// Rule settings, in declaration order.
    pub rules: RawRules,

    /// Regexes for messages that are not linted.
    pub ignores: Vec<String>,

    /// Whether the built-in ignores (merges, reverts, fixups) apply.
    #[serde(alias = "defaultIgnores")]
    pub default_ignores: Option<bool>,

    /// Link shown after a failing report.
    #[serde(alias = "helpUrl")]
    pub help_url: Option<String>,
}

/// Rule arrays keyed by rule name, keeping file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRules(pub Vec<(String, Vec<RuleValue>)>);

impl<'de> Deserialize<'de> for RawRules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawRulesVisitor;

        impl<'de> Visitor<'de> for RawRulesVisitor {
            type Value = RawRules;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of rule names to [severity, applicability, value] arrays")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawRules, A::Error> {
                let mut entries = Vec::new();
                while let Some((name, values)) = map.next_entry::<String, Vec<RuleValue>>()? {
                    entries.push((name, values));
                }
                Ok(RawRules(entries))
            }
        }

        deserializer.deserialize_map(RawRulesVisitor)
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LintConfig {
    /// Regexes for messages that are not linted.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignores: Vec<String>,

    /// Whether the built-in ignores apply (`None` means yes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_ignores: Option<bool>,

    /// Link shown after a failing report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,

    /// Rules in evaluation order.
    pub rules: RuleConfig,
}

impl LintConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }

    /// The built-in conventional-commit preset on its own.
    pub fn conventional() -> crate::error::Result<Self> {
        super::loader::resolve_preset(super::default::CONVENTIONAL)
    }

    /// Whether the built-in ignores apply.
    pub fn default_ignores_enabled(&self) -> bool {
        self.default_ignores.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_rules_keep_order() {
        let file: ConfigFile = toml::from_str(
            r#"
[rules]
subject-max-length = [2, "always", 100]
type-enum = [2, "always", ["feat", "fix"]]
subject-case = [0]
"#,
        )
        .unwrap();

        let names: Vec<_> = file.rules.0.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["subject-max-length", "type-enum", "subject-case"]);
        assert_eq!(
            file.rules.0[1].1,
            vec![
                RuleValue::Integer(2),
                RuleValue::Text("always".to_string()),
                RuleValue::List(vec!["feat".to_string(), "fix".to_string()]),
            ]
        );
    }

    #[test]
    fn test_json_aliases() {
        let file: ConfigFile = serde_json::from_str(
            r#"{"extends": ["config-conventional"], "defaultIgnores": false, "helpUrl": "https://example.com"}"#,
        )
        .unwrap();
        assert_eq!(file.extends, vec!["config-conventional"]);
        assert_eq!(file.default_ignores, Some(false));
        assert_eq!(file.help_url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_default_ignores_enabled_by_default() {
        assert!(LintConfig::default().default_ignores_enabled());
    }
}
