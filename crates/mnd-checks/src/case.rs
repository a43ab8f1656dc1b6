//! Detector for magic numbers in switch case clauses.

use mnd_core::{CheckKind, Detector, DetectorContext, Expr, Node, NodeKind};

use crate::operands::report_literal_operands;

/// Reports magic literals used as `case` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseDetector;

impl CaseDetector {
    /// Creates a new case detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Detector for CaseDetector {
    fn check_kind(&self) -> CheckKind {
        CheckKind::Case
    }

    fn description(&self) -> &'static str {
        "Magic numbers used as switch case values"
    }

    fn node_filter(&self) -> &'static [NodeKind] {
        &[NodeKind::Case]
    }

    fn check(&self, node: &Node, cx: &mut DetectorContext<'_>) {
        let Node::Case(case) = node else {
            return;
        };

        for value in &case.values {
            match value {
                Expr::Literal(lit) => {
                    cx.report_if_magic(lit, self.check_kind());
                }
                Expr::Binary(bin) => report_literal_operands(bin, cx, self.check_kind()),
                _ => {}
            }
        }
    }
}
