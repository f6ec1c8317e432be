// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Messages that are exempt from linting.

use crate::error::{ConfigError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Messages git and hosting services generate on their own.
    static ref DEFAULT_IGNORES: Vec<Regex> = [
        r"^Merge pull request",
        r"^Merge .*? into .*",
        r"^Merge branch ",
        r"^Merge tag ",
        r"^Merge remote-tracking branch",
        r"^Merged .*? (?:in|into) ",
        r"^Merged PR .*: ",
        r"^[Rr]evert ",
        r"^(?:amend|fixup|squash)!",
        r"^Automatic merge",
        r"^Auto-merged .*? into ",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect();
}

/// Matcher for messages that should not be linted.
#[derive(Debug, Clone, Default)]
pub struct Ignores {
    defaults: bool,
    custom: Vec<Regex>,
}

impl Ignores {
    /// Build a matcher from the configured patterns.
    pub fn new(defaults: bool, patterns: &[String]) -> Result<Self> {
        let custom = patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidIgnore {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { defaults, custom })
    }

    /// Check whether a raw message is exempt.
    pub fn is_ignored(&self, raw: &str) -> bool {
        let header = raw.lines().next().unwrap_or("");
        if self.defaults && DEFAULT_IGNORES.iter().any(|re| re.is_match(header)) {
            return true;
        }
        self.custom.iter().any(|re| re.is_match(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ignores() {
        let ignores = Ignores::new(true, &[]).unwrap();
        assert!(ignores.is_ignored("Merge branch 'main' into feature"));
        assert!(ignores.is_ignored("Merge pull request #42 from org/branch"));
        assert!(ignores.is_ignored("Revert \"feat: add parser\""));
        assert!(ignores.is_ignored("fixup! feat: add parser"));
        assert!(!ignores.is_ignored("feat: add parser"));
        assert!(!ignores.is_ignored("update stuff"));
    }

    #[test]
    fn test_defaults_disabled() {
        let ignores = Ignores::new(false, &[]).unwrap();
        assert!(!ignores.is_ignored("Merge branch 'main'"));
    }

    #[test]
    fn test_custom_ignores() {
        let ignores = Ignores::new(false, &["^WIP".to_string()]).unwrap();
        assert!(ignores.is_ignored("WIP do not merge"));
        assert!(!ignores.is_ignored("feat: add parser"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Ignores::new(true, &["(unclosed".to_string()]).unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }
}
