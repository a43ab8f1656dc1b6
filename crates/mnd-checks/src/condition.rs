//! Detector for magic numbers compared in `if` conditions.

use mnd_core::{CheckKind, Detector, DetectorContext, Node, NodeKind};

use crate::operands::report_literal_operands;

/// Reports magic literal operands of a binary `if` condition.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionDetector;

impl ConditionDetector {
    /// Creates a new condition detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Detector for ConditionDetector {
    fn check_kind(&self) -> CheckKind {
        CheckKind::Condition
    }

    fn description(&self) -> &'static str {
        "Magic numbers compared in if conditions"
    }

    fn node_filter(&self) -> &'static [NodeKind] {
        &[NodeKind::If]
    }

    fn check(&self, node: &Node, cx: &mut DetectorContext<'_>) {
        if let Node::If(stmt) = node {
            if let Some(bin) = stmt.condition.as_binary() {
                report_literal_operands(bin, cx, self.check_kind());
            }
        }
    }
}
