//! Shared helpers for inspecting binary expression operands.

use mnd_core::syntax::BinaryExpr;
use mnd_core::{CheckKind, DetectorContext, Expr};

/// Reports each operand of `bin` that is a magic literal.
pub(crate) fn report_literal_operands(
    bin: &BinaryExpr,
    cx: &mut DetectorContext<'_>,
    check: CheckKind,
) {
    for operand in [&bin.left, &bin.right] {
        if let Some(lit) = operand.as_literal() {
            cx.report_if_magic(lit, check);
        }
    }
}

/// Like [`report_literal_operands`], also descending into operands that are
/// binary expressions themselves, one level deep.
pub(crate) fn report_nested_operands(
    bin: &BinaryExpr,
    cx: &mut DetectorContext<'_>,
    check: CheckKind,
) {
    for operand in [&bin.left, &bin.right] {
        match operand {
            Expr::Literal(lit) => {
                cx.report_if_magic(lit, check);
            }
            Expr::Binary(inner) => report_literal_operands(inner, cx, check),
            _ => {}
        }
    }
}
