//! Numeric literal classification.

use crate::policy::IgnorePolicy;
use crate::syntax::{Literal, LiteralKind};

/// Returns true if a literal of `kind` with `text` is a magic number.
///
/// Only integer and floating-point literals qualify, and only when the
/// policy does not ignore their value.
#[must_use]
pub fn is_magic(kind: LiteralKind, text: &str, policy: &dyn IgnorePolicy) -> bool {
    matches!(kind, LiteralKind::Int | LiteralKind::Float) && !policy.is_ignored_number(text)
}

/// [`is_magic`] applied to a literal token.
#[must_use]
pub fn is_magic_literal(literal: &Literal, policy: &dyn IgnorePolicy) -> bool {
    is_magic(literal.kind, &literal.text, policy)
}
