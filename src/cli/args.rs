// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cmlint - Rule-based commit message linter
///
/// Reads a commit message, checks it against the configured rules and exits
/// non-zero when an error-level rule fails.
#[derive(Parser, Debug)]
#[command(name = "cmlint")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Rule-based commit message linter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run (defaults to lint if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Lint options when no command is given
    #[command(flatten)]
    pub lint: LintArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CMLINT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Lint commit messages (default command)
    Lint(LintArgs),

    /// Print the resolved configuration
    PrintConfig,

    /// Write an example cmlint.toml
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the lint command.
///
/// With no source given, the message is read from stdin.
#[derive(Parser, Debug, Default, Clone)]
pub struct LintArgs {
    /// Lint this message text
    #[arg(short, long, conflicts_with_all = ["file", "edit", "from"])]
    pub message: Option<String>,

    /// Read the message from a file ("-" for stdin)
    #[arg(short, long, conflicts_with_all = ["edit", "from"])]
    pub file: Option<PathBuf>,

    /// Read the message from .git/COMMIT_EDITMSG, or from the given file
    #[arg(short, long, value_name = "PATH", num_args = 0..=1, conflicts_with = "from")]
    pub edit: Option<Option<PathBuf>>,

    /// Lint every commit after this reference
    #[arg(long, value_name = "REF")]
    pub from: Option<String>,

    /// Last commit of the range (default: HEAD)
    #[arg(long, value_name = "REF", requires = "from")]
    pub to: Option<String>,

    /// Strict mode: treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Default, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    /// Get the effective command, defaulting to Lint if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Lint(self.lint.clone()))
    }

    /// Whether machine-readable output was requested.
    pub fn is_json(&self) -> bool {
        self.format == Some(OutputFormat::Json)
    }
}

impl LintArgs {
    /// The `from..to` range to lint, if one was given.
    pub fn range(&self) -> Option<String> {
        self.from
            .as_ref()
            .map(|from| format!("{}..{}", from, self.to.as_deref().unwrap_or("HEAD")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command() {
        let args = Cli::parse_from(["cmlint"]);
        assert!(args.command.is_none());
        assert!(matches!(args.effective_command(), Commands::Lint(_)));
    }

    #[test]
    fn test_top_level_lint_flags() {
        let args = Cli::parse_from(["cmlint", "--edit", ".git/COMMIT_EDITMSG", "--strict"]);
        match args.effective_command() {
            Commands::Lint(lint) => {
                assert_eq!(lint.edit, Some(Some(PathBuf::from(".git/COMMIT_EDITMSG"))));
                assert!(lint.strict);
            }
            other => panic!("Expected Lint command, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_without_path() {
        let args = Cli::parse_from(["cmlint", "lint", "--edit"]);
        if let Some(Commands::Lint(lint)) = args.command {
            assert_eq!(lint.edit, Some(None));
        } else {
            panic!("Expected Lint command");
        }
    }

    #[test]
    fn test_range() {
        let args = Cli::parse_from(["cmlint", "lint", "--from", "v1.0.0"]);
        if let Some(Commands::Lint(lint)) = args.command {
            assert_eq!(lint.range().as_deref(), Some("v1.0.0..HEAD"));
        } else {
            panic!("Expected Lint command");
        }
    }

    #[test]
    fn test_message_conflicts_with_file() {
        let result = Cli::try_parse_from(["cmlint", "lint", "-m", "feat: x", "-f", "msg.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_to_requires_from() {
        let result = Cli::try_parse_from(["cmlint", "lint", "--to", "HEAD"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let args = Cli::parse_from(["cmlint", "print-config", "--format", "json", "-c", "x.toml"]);
        assert!(matches!(args.command, Some(Commands::PrintConfig)));
        assert!(args.is_json());
        assert_eq!(args.config, Some(PathBuf::from("x.toml")));
    }
}
