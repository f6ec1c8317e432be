// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::commit::DEFAULT_COMMENT_CHAR;
use crate::error::{GitError, LintError, Result};
use git2::{Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository for reading commit messages.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            LintError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open a repository from a path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                LintError::Git(GitError::NotARepository)
            } else {
                LintError::Git(GitError::from(e))
            }
        })?;

        Ok(Self { inner: repo })
    }

    /// Get the git directory path (.git).
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Path of the message file git hands to `commit-msg` hooks.
    pub fn commit_editmsg_path(&self) -> PathBuf {
        self.git_dir().join("COMMIT_EDITMSG")
    }

    /// The configured `core.commentChar`, `#` when unset or `auto`.
    pub fn comment_char(&self) -> char {
        self.inner
            .config()
            .and_then(|config| config.get_string("core.commentChar"))
            .ok()
            .filter(|value| value != "auto")
            .and_then(|value| value.chars().next())
            .unwrap_or(DEFAULT_COMMENT_CHAR)
    }

    /// Get a commit by reference (SHA, branch name, etc.).
    pub fn get_commit(&self, reference: &str) -> Result<git2::Commit<'_>> {
        let obj = self.inner.revparse_single(reference).map_err(|e| {
            LintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        let commit = obj.peel_to_commit().map_err(|e| {
            LintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        Ok(commit)
    }

    /// Get the id and message of a commit.
    pub fn get_commit_message(&self, reference: &str) -> Result<(Oid, String)> {
        let commit = self.get_commit(reference)?;
        Ok((commit.id(), commit_message(&commit)))
    }

    /// Get commits in a `from..to` range, newest first.
    pub fn get_commits_in_range(&self, range: &str) -> Result<Vec<(Oid, String)>> {
        let Some((from, to)) = range.split_once("..") else {
            return Ok(vec![self.get_commit_message(range)?]);
        };
        let to = if to.is_empty() { "HEAD" } else { to };

        let walk_error = |command: &str, e: git2::Error| {
            LintError::Git(GitError::CommandFailed {
                command: command.to_string(),
                message: e.message().to_string(),
            })
        };

        let mut revwalk = self.inner.revwalk().map_err(|e| walk_error("revwalk", e))?;
        revwalk
            .set_sorting(git2::Sort::TOPOLOGICAL)
            .map_err(|e| walk_error("revwalk.set_sorting", e))?;
        revwalk
            .push(self.get_commit(to)?.id())
            .map_err(|e| walk_error("revwalk.push", e))?;
        revwalk
            .hide(self.get_commit(from)?.id())
            .map_err(|e| walk_error("revwalk.hide", e))?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result.map_err(|e| walk_error("revwalk", e))?;
            let commit = self.inner.find_commit(oid).map_err(|e| {
                LintError::Git(GitError::InvalidReference {
                    reference: format!("{}: {}", oid, e.message()),
                })
            })?;
            commits.push((oid, commit_message(&commit)));
        }

        Ok(commits)
    }
}

/// Commit message text. Bytes that are not UTF-8 become U+FFFD.
fn commit_message(commit: &git2::Commit<'_>) -> String {
    String::from_utf8_lossy(commit.message_bytes()).into_owned()
}

/// Get commits in a range.
pub fn get_commit_range(range: &str) -> Result<Vec<(String, String)>> {
    let repo = Repository::open_current()?;
    let commits = repo.get_commits_in_range(range)?;
    Ok(commits
        .into_iter()
        .map(|(oid, msg)| (oid.to_string(), msg))
        .collect())
}

/// Comment character of the current repository, `#` outside one.
pub fn comment_char() -> char {
    Repository::open_current()
        .map(|repo| repo.comment_char())
        .unwrap_or(DEFAULT_COMMENT_CHAR)
}

/// Path of `COMMIT_EDITMSG` in the current repository.
pub fn commit_editmsg_path() -> Result<PathBuf> {
    Ok(Repository::open_current()?.commit_editmsg_path())
}
