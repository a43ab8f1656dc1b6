//! Detector for magic numbers assigned directly to variables or fields.

use mnd_core::{CheckKind, Detector, DetectorContext, Node, NodeKind};

/// Reports magic literals on the right-hand side of assignments and as
/// composite literal values (`Config{Port: 8080}`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignDetector;

impl AssignDetector {
    /// Creates a new assign detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Detector for AssignDetector {
    fn check_kind(&self) -> CheckKind {
        CheckKind::Assign
    }

    fn description(&self) -> &'static str {
        "Magic numbers assigned to variables and struct fields"
    }

    fn node_filter(&self) -> &'static [NodeKind] {
        &[NodeKind::Assign, NodeKind::KeyValue]
    }

    fn check(&self, node: &Node, cx: &mut DetectorContext<'_>) {
        match node {
            Node::Assign(assign) => {
                for lit in assign.rhs.iter().filter_map(|e| e.as_literal()) {
                    cx.report_if_magic(lit, self.check_kind());
                }
            }
            Node::KeyValue(kv) => {
                if let Some(lit) = kv.value.as_literal() {
                    cx.report_if_magic(lit, self.check_kind());
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check_body, literals};

    #[test]
    fn reports_assigned_literals() {
        let violations = check_body(AssignDetector, "\tx := 42\n\ty, z := 3, 0\n\t_, _, _ = x, y, z");
        assert_eq!(literals(&violations), vec!["42", "3"]);
        assert!(violations.iter().all(|v| v.code == "MND002"));
    }

    #[test]
    fn reports_compound_assignment() {
        let violations = check_body(AssignDetector, "\ta += 10");
        assert_eq!(literals(&violations), vec!["10"]);
    }

    #[test]
    fn reports_composite_literal_values() {
        let violations = check_body(AssignDetector, "\t_ = Server{Port: 8080, Debug: true}");
        assert_eq!(literals(&violations), vec!["8080"]);
    }

    #[test]
    fn expressions_are_left_to_other_checks() {
        assert!(check_body(AssignDetector, "\tx := a * 60\n\t_ = x").is_empty());
        assert!(check_body(AssignDetector, "\tx := -5\n\t_ = x").is_empty());
    }

    #[test]
    fn allow_directive_suppresses_finding() {
        let violations = check_body(
            AssignDetector,
            "\t// mnd: allow(assign) reason=\"HTTP port\"\n\tport := 8080\n\t_ = port",
        );
        assert!(violations.is_empty());
    }
}
