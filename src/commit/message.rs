// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and parsing.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// A footer line: `Token: value` or `Token #value`.
    static ref FOOTER_TOKEN: Regex =
        Regex::new(r"^(?:BREAKING[ -]CHANGE|[\w-]+)(?:: | #)").unwrap();

    /// A breaking-change note, which may run on over several lines.
    static ref BREAKING_TOKEN: Regex = Regex::new(r"^BREAKING[ -]CHANGE: ").unwrap();
}

/// Line git inserts above the diff in verbose commit templates, after the comment char.
const SCISSORS: &str = " ------------------------ >8 ------------------------";

/// Git's default `core.commentChar`.
pub const DEFAULT_COMMENT_CHAR: char = '#';

/// A parsed commit message.
///
/// Parsing never fails. Missing parts are left empty and reported by rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitMessage {
    /// The input text, unchanged.
    pub raw: String,
    /// First line.
    pub header: String,
    /// Commit type (feat, fix, etc.). Empty when the header has no `": "`.
    #[serde(rename = "type")]
    pub commit_type: String,
    /// Optional scope.
    pub scope: Option<String>,
    /// Subject line.
    pub subject: String,
    /// Body, without surrounding blank lines.
    pub body: String,
    /// Trailing `Token: value` block.
    pub footer: String,
    /// Whether this is a breaking change.
    pub is_breaking: bool,
    /// Whether the body starts after a blank line.
    pub body_leading_blank: bool,
    /// Whether the footer starts after a blank line.
    pub footer_leading_blank: bool,
}

impl CommitMessage {
    /// Parse a commit message from a string.
    pub fn parse(raw: &str) -> Self {
        let lines: Vec<&str> = raw.lines().collect();
        let header = lines.first().copied().unwrap_or("");
        let rest = lines.get(1..).unwrap_or(&[]);

        let (type_token, subject) = header.split_once(": ").unwrap_or(("", ""));
        let (type_token, bang) = match type_token.strip_suffix('!') {
            Some(stripped) => (stripped, true),
            None => (type_token, false),
        };
        let (commit_type, scope) = split_scope(type_token);

        // Trailing blank lines belong to neither body nor footer
        let mut end = rest.len();
        while end > 0 && rest[end - 1].trim().is_empty() {
            end -= 1;
        }

        let mut footer_start = end;
        while footer_start > 0 && FOOTER_TOKEN.is_match(rest[footer_start - 1]) {
            footer_start -= 1;
        }
        // A trailer run glued to body text is still body
        if footer_start > 0 && !rest[footer_start - 1].trim().is_empty() {
            footer_start = end;
        }
        if let Some(pos) = rest[..footer_start]
            .iter()
            .position(|line| BREAKING_TOKEN.is_match(line))
        {
            footer_start = pos;
        }

        let footer_lines = &rest[footer_start..end];
        let body_lines = trim_blank_lines(&rest[..footer_start]);

        let body_leading_blank = rest.first().map_or(true, |line| line.trim().is_empty());
        let footer_leading_blank = footer_start > 0 && rest[footer_start - 1].trim().is_empty();

        let is_breaking = bang || footer_lines.iter().any(|line| BREAKING_TOKEN.is_match(line));

        Self {
            raw: raw.to_string(),
            header: header.to_string(),
            commit_type: commit_type.to_string(),
            scope: scope.map(str::to_string),
            subject: subject.to_string(),
            body: body_lines.join("\n"),
            footer: footer_lines.join("\n"),
            is_breaking,
            body_leading_blank,
            footer_leading_blank,
        }
    }

    /// Whether the message has a body.
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// Whether the message has a footer.
    pub fn has_footer(&self) -> bool {
        !self.footer.is_empty()
    }

    /// Individual scopes, for messages like `feat(api,cli): ...`.
    pub fn scopes(&self) -> Vec<&str> {
        match self.scope {
            Some(ref scope) => scope
                .split(['/', '\\', ','])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Remove git comment lines and everything below the scissors line.
///
/// `comment_char` is the repository's `core.commentChar`.
pub fn strip_comments(raw: &str, comment_char: char) -> String {
    let mut kept = Vec::new();
    for line in raw.lines() {
        if let Some(rest) = line.strip_prefix(comment_char) {
            if rest == SCISSORS {
                break;
            }
            continue;
        }
        kept.push(line);
    }
    kept.join("\n")
}

/// Split `type(scope)` into its parts.
fn split_scope(token: &str) -> (&str, Option<&str>) {
    if let (Some(open), true) = (token.find('('), token.ends_with(')')) {
        let scope = &token[open + 1..token.len() - 1];
        let scope = if scope.is_empty() { None } else { Some(scope) };
        (&token[..open], scope)
    } else {
        (token, None)
    }
}

fn trim_blank_lines<'a, 'b>(lines: &'a [&'b str]) -> &'a [&'b str] {
    let start = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(start, |i| i + 1);
    &lines[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_only() {
        let msg = CommitMessage::parse("feat: add parser");
        assert_eq!(msg.commit_type, "feat");
        assert_eq!(msg.scope, None);
        assert_eq!(msg.subject, "add parser");
        assert!(!msg.has_body());
        assert!(!msg.has_footer());
        assert!(!msg.is_breaking);
    }

    #[test]
    fn test_parse_scope() {
        let msg = CommitMessage::parse("feat(parser): support scoped commits");
        assert_eq!(msg.commit_type, "feat");
        assert_eq!(msg.scope.as_deref(), Some("parser"));
        assert_eq!(msg.subject, "support scoped commits");
    }

    #[test]
    fn test_parse_body() {
        let msg =
            CommitMessage::parse("feat(parser): support scoped commits\n\nThis body line is fine.");
        assert_eq!(msg.body, "This body line is fine.");
        assert!(msg.body_leading_blank);
        assert!(!msg.has_footer());
    }

    #[test]
    fn test_parse_no_colon() {
        let msg = CommitMessage::parse("update stuff");
        assert_eq!(msg.header, "update stuff");
        assert_eq!(msg.commit_type, "");
        assert_eq!(msg.subject, "");
    }

    #[test]
    fn test_parse_empty() {
        let msg = CommitMessage::parse("");
        assert_eq!(msg, CommitMessage {
            body_leading_blank: true,
            ..CommitMessage::default()
        });
    }

    #[test]
    fn test_parse_breaking_bang() {
        let msg = CommitMessage::parse("feat(api)!: drop v1 endpoints");
        assert!(msg.is_breaking);
        assert_eq!(msg.commit_type, "feat");
        assert_eq!(msg.scope.as_deref(), Some("api"));
    }

    #[test]
    fn test_parse_footer() {
        let msg = CommitMessage::parse(
            "fix: handle empty input\n\nThe parser crashed on empty strings.\n\nCloses #12\nReviewed-by: Jane\n",
        );
        assert_eq!(msg.body, "The parser crashed on empty strings.");
        assert_eq!(msg.footer, "Closes #12\nReviewed-by: Jane");
        assert!(msg.footer_leading_blank);
        assert!(!msg.is_breaking);
    }

    #[test]
    fn test_parse_breaking_footer_with_continuation() {
        let msg = CommitMessage::parse(
            "feat: new config format\n\nBody text.\n\nBREAKING CHANGE: the old format\nis no longer read.",
        );
        assert_eq!(msg.body, "Body text.");
        assert_eq!(
            msg.footer,
            "BREAKING CHANGE: the old format\nis no longer read."
        );
        assert!(msg.is_breaking);
    }

    #[test]
    fn test_parse_footer_without_blank_line() {
        let msg = CommitMessage::parse("fix: typo\nCloses #3");
        assert_eq!(msg.footer, "Closes #3");
        assert!(!msg.footer_leading_blank);
        assert!(!msg.has_body());
    }

    #[test]
    fn test_token_line_inside_body_paragraph() {
        let msg =
            CommitMessage::parse("fix: x\n\nWe changed the parser.\nNote: this is still body");
        assert_eq!(msg.body, "We changed the parser.\nNote: this is still body");
        assert!(!msg.has_footer());
    }

    #[test]
    fn test_breaking_change_inside_body_paragraph() {
        let msg = CommitMessage::parse("feat: x\n\nSome context.\nBREAKING CHANGE: drops v1");
        assert_eq!(msg.body, "Some context.");
        assert_eq!(msg.footer, "BREAKING CHANGE: drops v1");
        assert!(!msg.footer_leading_blank);
        assert!(msg.is_breaking);
    }

    #[test]
    fn test_parse_body_without_blank_line() {
        let msg = CommitMessage::parse("fix: typo\nfixed the readme");
        assert_eq!(msg.body, "fixed the readme");
        assert!(!msg.body_leading_blank);
    }

    #[test]
    fn test_trailing_blank_lines_dropped_from_body() {
        let msg = CommitMessage::parse("docs: readme\n\nline one\nline two\n\n\n   \n");
        assert_eq!(msg.body, "line one\nline two");
    }

    #[test]
    fn test_parse_crlf() {
        let msg = CommitMessage::parse("fix: windows\r\n\r\nbody\r\n");
        assert_eq!(msg.subject, "windows");
        assert_eq!(msg.body, "body");
    }

    #[test]
    fn test_scopes_split() {
        let msg = CommitMessage::parse("feat(api, cli/core): add flag");
        assert_eq!(msg.scopes(), vec!["api", "cli", "core"]);
    }

    #[test]
    fn test_empty_scope_is_none() {
        let msg = CommitMessage::parse("feat(): add flag");
        assert_eq!(msg.commit_type, "feat");
        assert_eq!(msg.scope, None);
    }

    #[test]
    fn test_strip_comments() {
        let raw = "feat: add parser\n\n# Please enter the commit message\nbody\n# ------------------------ >8 ------------------------\ndiff --git a b";
        assert_eq!(
            strip_comments(raw, DEFAULT_COMMENT_CHAR),
            "feat: add parser\n\nbody"
        );
    }

    #[test]
    fn test_strip_comments_custom_char() {
        let raw = "feat: add parser\n; Please enter the commit message\n#1 is fixed\n; ------------------------ >8 ------------------------\ndiff";
        assert_eq!(strip_comments(raw, ';'), "feat: add parser\n#1 is fixed");
    }
}
