// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message parsing.

mod ignore;
mod message;

pub use ignore::Ignores;
pub use message::{strip_comments, CommitMessage, DEFAULT_COMMENT_CHAR};
