// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Case styles used by the `*-case` rules.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref CAMEL_CASE: Regex = Regex::new(r"^[a-z][a-zA-Z0-9]*$").unwrap();
    static ref PASCAL_CASE: Regex = Regex::new(r"^[A-Z][a-zA-Z0-9]*$").unwrap();
    static ref KEBAB_CASE: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
    static ref SNAKE_CASE: Regex = Regex::new(r"^[a-z0-9]+(?:_[a-z0-9]+)*$").unwrap();
}

/// A letter-casing convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseStyle {
    LowerCase,
    UpperCase,
    CamelCase,
    KebabCase,
    PascalCase,
    SentenceCase,
    SnakeCase,
    StartCase,
}

impl CaseStyle {
    /// Every supported style.
    pub const ALL: [CaseStyle; 8] = [
        CaseStyle::LowerCase,
        CaseStyle::UpperCase,
        CaseStyle::CamelCase,
        CaseStyle::KebabCase,
        CaseStyle::PascalCase,
        CaseStyle::SentenceCase,
        CaseStyle::SnakeCase,
        CaseStyle::StartCase,
    ];

    /// Configuration name of the style.
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStyle::LowerCase => "lower-case",
            CaseStyle::UpperCase => "upper-case",
            CaseStyle::CamelCase => "camel-case",
            CaseStyle::KebabCase => "kebab-case",
            CaseStyle::PascalCase => "pascal-case",
            CaseStyle::SentenceCase => "sentence-case",
            CaseStyle::SnakeCase => "snake-case",
            CaseStyle::StartCase => "start-case",
        }
    }

    /// Check whether `text` is written in this style.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            CaseStyle::LowerCase => text == text.to_lowercase(),
            CaseStyle::UpperCase => text == text.to_uppercase(),
            CaseStyle::CamelCase => CAMEL_CASE.is_match(text),
            CaseStyle::KebabCase => KEBAB_CASE.is_match(text),
            CaseStyle::PascalCase => PASCAL_CASE.is_match(text),
            CaseStyle::SnakeCase => SNAKE_CASE.is_match(text),
            CaseStyle::SentenceCase => {
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => {
                        let rest = chars.as_str();
                        first.is_uppercase() && rest == rest.to_lowercase()
                    }
                    None => false,
                }
            }
            CaseStyle::StartCase => {
                let mut words = text.split_whitespace().peekable();
                words.peek().is_some()
                    && words.all(|word| word.chars().next().is_some_and(char::is_uppercase))
            }
        }
    }
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CaseStyle::ALL
            .iter()
            .copied()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| format!("unknown case style '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_and_upper() {
        assert!(CaseStyle::LowerCase.matches("add parser"));
        assert!(!CaseStyle::LowerCase.matches("Add parser"));
        assert!(CaseStyle::UpperCase.matches("ADD PARSER"));
        assert!(!CaseStyle::UpperCase.matches("Add"));
    }

    #[test]
    fn test_sentence_and_start() {
        assert!(CaseStyle::SentenceCase.matches("Add parser"));
        assert!(!CaseStyle::SentenceCase.matches("Add Parser"));
        assert!(CaseStyle::StartCase.matches("Add Parser"));
        assert!(!CaseStyle::StartCase.matches("Add parser"));
        assert!(!CaseStyle::StartCase.matches(""));
    }

    #[test]
    fn test_identifier_styles() {
        assert!(CaseStyle::CamelCase.matches("addParser"));
        assert!(CaseStyle::PascalCase.matches("AddParser"));
        assert!(CaseStyle::KebabCase.matches("add-parser"));
        assert!(CaseStyle::SnakeCase.matches("add_parser"));
        assert!(!CaseStyle::KebabCase.matches("add_parser"));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("pascal-case".parse::<CaseStyle>(), Ok(CaseStyle::PascalCase));
        assert!("title-case".parse::<CaseStyle>().is_err());
    }
}
