//! Detector for magic numbers returned from functions.

use mnd_core::{CheckKind, Detector, DetectorContext, Node, NodeKind};

/// Reports magic literals in `return` statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnDetector;

impl ReturnDetector {
    /// Creates a new return detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Detector for ReturnDetector {
    fn check_kind(&self) -> CheckKind {
        CheckKind::Return
    }

    fn description(&self) -> &'static str {
        "Magic numbers returned from functions"
    }

    fn node_filter(&self) -> &'static [NodeKind] {
        &[NodeKind::Return]
    }

    fn check(&self, node: &Node, cx: &mut DetectorContext<'_>) {
        if let Node::Return(ret) = node {
            for lit in ret.results.iter().filter_map(|e| e.as_literal()) {
                cx.report_if_magic(lit, self.check_kind());
            }
        }
    }
}
