// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and `extends` resolution.

use crate::error::{ConfigError, LintError, Result};
use crate::rules::{RuleConfig, RuleName, RuleSetting};
use std::path::{Path, PathBuf};

use super::default::{preset, CONVENTIONAL};
use super::schema::{ConfigFile, LintConfig, RawRules};

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &[
    "cmlint.toml",
    ".cmlint.toml",
    ".cmlintrc.json",
    ".config/cmlint.toml",
];

/// On-disk configuration syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the syntax from a file extension. Anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        // Try parent directory
        if !current.pop() {
            break;
        }
    }

    // Check XDG config directory
    let user_config = dirs::config_dir()?.join("cmlint").join("config.toml");
    if user_config.is_file() {
        return Some(user_config);
    }

    None
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<LintConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using {}", CONVENTIONAL);
            LintConfig::conventional()
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<LintConfig> {
    let mut chain = Vec::new();
    load_file(path, &mut chain)
}

/// Parse configuration from a TOML string.
///
/// Relative `extends` entries resolve against the current directory.
pub fn parse_config(content: &str) -> Result<LintConfig> {
    let file = parse_config_file(content, ConfigFormat::Toml)?;
    resolve(file, None, &mut Vec::new())
}

/// Parse a single configuration file without resolving `extends`.
pub fn parse_config_file(content: &str, format: ConfigFormat) -> Result<ConfigFile> {
    let parsed = match format {
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| format!("Failed to parse TOML: {}", e))
        }
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| format!("Failed to parse JSON: {}", e))
        }
    };

    parsed.map_err(|message| LintError::Config(ConfigError::ParseError { message }))
}

/// Resolve a built-in preset by name.
pub fn resolve_preset(name: &str) -> Result<LintConfig> {
    let content = preset(name).ok_or_else(|| ConfigError::UnknownPreset {
        name: name.to_string(),
    })?;
    let file = parse_config_file(content, ConfigFormat::Toml)?;
    resolve(file, None, &mut Vec::new())
}

/// Merge two configurations, with the overlay taking precedence.
pub fn merge_configs(base: LintConfig, overlay: LintConfig) -> LintConfig {
    let mut rules = base.rules;
    rules.merge(overlay.rules);

    let mut ignores = base.ignores;
    for pattern in overlay.ignores {
        if !ignores.contains(&pattern) {
            ignores.push(pattern);
        }
    }

    LintConfig {
        ignores,
        default_ignores: overlay.default_ignores.or(base.default_ignores),
        help_url: overlay.help_url.or(base.help_url),
        rules,
    }
}

fn load_file(path: &Path, chain: &mut Vec<PathBuf>) -> Result<LintConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.is_file() {
        return Err(LintError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let canonical = path.canonicalize()?;
    if chain.contains(&canonical) {
        return Err(LintError::Config(ConfigError::ExtendsCycle { path: canonical }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        LintError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;
    let file = parse_config_file(&content, ConfigFormat::from_path(path))?;

    chain.push(canonical);
    let resolved = resolve(file, path.parent(), chain);
    chain.pop();
    resolved
}

/// Apply a file's `extends` left to right, then the file's own settings.
fn resolve(
    file: ConfigFile,
    base_dir: Option<&Path>,
    chain: &mut Vec<PathBuf>,
) -> Result<LintConfig> {
    let mut config = LintConfig::default();

    for name in &file.extends {
        let base = if is_path_reference(name) {
            let path = match base_dir {
                Some(dir) => dir.join(name),
                None => PathBuf::from(name),
            };
            load_file(&path, chain)?
        } else {
            tracing::debug!("Extending preset: {}", name);
            resolve_preset(name)?
        };
        config = merge_configs(config, base);
    }

    let own = LintConfig {
        ignores: file.ignores,
        default_ignores: file.default_ignores,
        help_url: file.help_url,
        rules: build_rules(file.rules)?,
    };
    Ok(merge_configs(config, own))
}

/// Validate raw rule arrays into typed settings.
fn build_rules(raw: RawRules) -> Result<RuleConfig> {
    let mut rules = RuleConfig::new();

    for (name, values) in raw.0 {
        let rule: RuleName = name
            .parse()
            .map_err(|name| ConfigError::UnknownRule { name })?;
        let setting = RuleSetting::from_values(rule, &values)?;
        rules.set(rule, setting);
    }

    Ok(rules)
}

fn is_path_reference(name: &str) -> bool {
    name.starts_with('.')
        || name.starts_with('/')
        || name.ends_with(".toml")
        || name.ends_with(".json")
}
