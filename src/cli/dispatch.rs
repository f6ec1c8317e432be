// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::io::{IsTerminal, Read};
use std::path::Path;

use crate::commit::strip_comments;
use crate::config::{default::example_config, LintConfig};
use crate::error::{ConfigError, LintError, LintFailure, Result, ResultExt};
use crate::rules::{LintReport, RuleEngine};

use super::args::{Cli, Commands, InitArgs, LintArgs};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    match cli.effective_command() {
        Commands::Lint(args) => run_lint(&cli, &load_config(&cli)?, args),
        Commands::PrintConfig => run_print_config(&cli, &load_config(&cli)?),
        Commands::Init(args) => run_init(args),
        Commands::Version => run_version(),
    }
}

fn load_config(cli: &Cli) -> Result<LintConfig> {
    match cli.config {
        Some(ref path) => LintConfig::load_from(path),
        None => LintConfig::load(),
    }
}

/// Run the lint command.
fn run_lint(cli: &Cli, config: &LintConfig, args: LintArgs) -> Result<()> {
    tracing::debug!("Running lint command with args: {:?}", args);

    let engine = RuleEngine::from_config(config)?;

    let reports = match args.range() {
        Some(range) => engine.lint_range(&range)?,
        None => vec![engine.lint_str(&read_message(&args)?)],
    };

    print_reports(cli, &reports)?;

    let failed: Vec<&LintReport> = reports.iter().filter(|r| !r.passes(args.strict)).collect();
    if failed.is_empty() {
        return Ok(());
    }

    if let (Some(url), false) = (config.help_url.as_ref(), cli.is_json()) {
        println!("ⓘ Get help: {}", url);
    }

    Err(LintError::Lint(LintFailure::Failed {
        errors: failed.iter().map(|r| r.error_count()).sum(),
        warnings: failed.iter().map(|r| r.warning_count()).sum(),
    }))
}

fn print_reports(cli: &Cli, reports: &[LintReport]) -> Result<()> {
    if cli.is_json() {
        println!("{}", render_json(reports)?);
    } else {
        for report in reports {
            print!("{}", report.render_text());
        }
    }
    Ok(())
}

fn render_json(reports: &[LintReport]) -> Result<String> {
    let json: Vec<_> = reports.iter().map(LintReport::to_json).collect();
    serde_json::to_string_pretty(&json).context("render json")
}

/// Read the message to lint from the source selected on the command line.
fn read_message(args: &LintArgs) -> Result<String> {
    if let Some(ref message) = args.message {
        return Ok(message.clone());
    }

    if let Some(ref edit) = args.edit {
        let path = match edit {
            Some(path) => path.clone(),
            None => crate::git::commit_editmsg_path()?,
        };
        let raw = read_file(&path)?;
        return Ok(strip_comments(&raw, crate::git::comment_char()));
    }

    match args.file {
        Some(ref path) if path.as_os_str() != "-" => read_file(path),
        Some(_) => read_stdin(),
        None => {
            if std::io::stdin().is_terminal() {
                return Err(LintError::WithContext {
                    context: "lint".to_string(),
                    message: "No commit message given. Use --message, --file, --edit, --from \
                              or pipe a message on stdin."
                        .to_string(),
                });
            }
            read_stdin()
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    tracing::debug!("Reading commit message from {:?}", path);
    std::fs::read_to_string(path).context(format!("Failed to read {}", path.display()))
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf)
}

/// Run the print-config command.
fn run_print_config(cli: &Cli, config: &LintConfig) -> Result<()> {
    let output = if cli.is_json() {
        serde_json::to_string_pretty(config).context("print-config")?
    } else {
        toml::to_string(config).context("print-config")?
    };
    println!("{}", output.trim_end());
    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("cmlint {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = Path::new("cmlint.toml");

    if config_path.exists() && !args.force {
        return Err(LintError::Config(ConfigError::AlreadyExists {
            path: config_path.to_path_buf(),
        }));
    }

    std::fs::write(config_path, example_config()).context("Failed to write configuration")?;

    println!("✓ Created cmlint.toml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_json_lists_every_report() {
        let reports = vec![LintReport::new("feat: a"), LintReport::ignored("Merge x")];
        let text = render_json(&reports).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(2));
        assert_eq!(json[1]["ignored"], true);
    }
}
