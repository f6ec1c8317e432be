// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in presets and the example configuration.

/// Name of the conventional-commit preset.
pub const CONVENTIONAL: &str = "config-conventional";

/// The conventional-commit rule set.
const CONVENTIONAL_PRESET: &str = r#"
[rules]
body-leading-blank = [1, "always"]
body-max-line-length = [2, "always", 100]
footer-leading-blank = [1, "always"]
footer-max-line-length = [2, "always", 100]
header-max-length = [2, "always", 100]
header-trim = [2, "always"]
subject-case = [2, "never", ["sentence-case", "start-case", "pascal-case", "upper-case"]]
subject-empty = [2, "never"]
subject-full-stop = [2, "never", "."]
type-case = [2, "always", "lower-case"]
type-empty = [2, "never"]
type-enum = [2, "always", ["build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test"]]
"#;

/// Look up a built-in preset by name.
pub fn preset(name: &str) -> Option<&'static str> {
    match name {
        "config-conventional" | "@commitlint/config-conventional" => Some(CONVENTIONAL_PRESET),
        _ => None,
    }
}

/// Names accepted by [`preset`].
pub fn preset_names() -> &'static [&'static str] {
    &[CONVENTIONAL]
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# cmlint configuration
# Severity: 0 = off, 1 = warning, 2 = error
# Applicability: "always" or "never"

extends = ["config-conventional"]

# Messages matching these patterns are not linted
# ignores = ["^WIP"]

[rules]
type-enum = [2, "always", ["feat", "fix", "docs", "style", "refactor", "perf", "test", "chore", "ci", "build", "revert"]]
subject-case = [0]
subject-max-length = [2, "always", 100]
body-max-line-length = [0]
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_aliases() {
        assert!(preset("config-conventional").is_some());
        assert!(preset("@commitlint/config-conventional").is_some());
        assert!(preset("config-angular").is_none());
    }

    #[test]
    fn test_preset_names_resolve() {
        for name in preset_names() {
            assert!(preset(name).is_some());
        }
    }
}
