//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! // mnd: allow(argument, case) reason="protocol constants"
//! ```

use std::collections::HashSet;

/// Result of checking for allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Check is not allowed.
    Denied,
    /// Check is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
struct AllowDirective {
    checks: HashSet<String>,
    reason: Option<String>,
}

/// Checks source code for an allowance comment covering `check_name`.
///
/// The directive may be a trailing comment on `line` (1-indexed) or a
/// comment on the line directly above.
#[must_use]
pub fn check_allow(content: &str, line: usize, check_name: &str) -> AllowCheck {
    let lines: Vec<&str> = content.lines().collect();

    for check_line in [line.saturating_sub(1), line] {
        if check_line == 0 || check_line > lines.len() {
            continue;
        }

        if let Some(directive) = parse_allow_directive(lines[check_line - 1]) {
            if directive.checks.contains(check_name) || directive.checks.contains("all") {
                return AllowCheck::Allowed {
                    reason: directive.reason,
                };
            }
        }
    }

    AllowCheck::Denied
}

/// Byte offset of the `//` that starts a line comment, skipping string,
/// raw string and rune literals.
fn comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            // Raw strings have no escapes
            Some(b'`') if b == b'`' => quote = None,
            Some(q) if q != b'`' && b == b'\\' => i += 1,
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if matches!(b, b'"' | b'`' | b'\'') => quote = Some(b),
            None if b == b'/' && bytes.get(i + 1) == Some(&b'/') => return Some(i),
            None => {}
        }
        i += 1;
    }

    None
}

/// Parses an allowance directive from the `//` comment on a line, if any.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let start = comment_start(line)?;
    let directive = line[start + 2..].trim_start().strip_prefix("mnd:")?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let checks: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    if checks.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .map(str::trim)
        .and_then(|r| r.strip_prefix('"'))
        .and_then(|r| r.find('"').map(|end| r[..end].to_string()));

    Some(AllowDirective { checks, reason })
}
