//! Detector for magic numbers used as operands of binary operations.

use mnd_core::{CheckKind, Detector, DetectorContext, Expr, Node, NodeKind};

use crate::operands::{report_literal_operands, report_nested_operands};

/// Reports magic literal operands of arithmetic and logical expressions
/// assigned to a variable, and of parenthesized binary expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationDetector;

impl OperationDetector {
    /// Creates a new operation detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Detector for OperationDetector {
    fn check_kind(&self) -> CheckKind {
        CheckKind::Operation
    }

    fn description(&self) -> &'static str {
        "Magic numbers used as operands of arithmetic or logical operations"
    }

    fn node_filter(&self) -> &'static [NodeKind] {
        &[NodeKind::Assign, NodeKind::Paren]
    }

    fn check(&self, node: &Node, cx: &mut DetectorContext<'_>) {
        match node {
            Node::Assign(assign) => {
                for bin in assign.rhs.iter().filter_map(Expr::as_binary) {
                    report_nested_operands(bin, cx, self.check_kind());
                }
            }
            Node::Paren(paren) => {
                if let Some(bin) = paren.inner.as_binary() {
                    report_literal_operands(bin, cx, self.check_kind());
                }
            }
            _ => {}
        }
    }
}
