// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Reads commit messages from a repository for linting.

mod repo;

pub use repo::{comment_char, commit_editmsg_path, get_commit_range, Repository};
