//! Detector for magic numbers passed as call arguments.
//!
//! # Detected Patterns
//!
//! - A magic literal as the first argument: `doWork(5, "label")`
//! - A magic literal directly after a channel type: `make(chan int, 5)`
//! - Magic literal operands of a binary argument: `doWork(a + 3)`
//!
//! # Not Detected
//!
//! - Literals in later argument positions: `doWork("label", 5)`
//! - Calls on the same line as a `const` declaration
//! - Calls to ignored functions such as `time.Date`

use mnd_core::syntax::CallExpr;
use mnd_core::{CheckKind, Detector, DetectorContext, Expr, Node, NodeKind};
use tracing::trace;

use crate::operands::report_literal_operands;

/// Reports magic numbers used as call arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentDetector;

impl ArgumentDetector {
    /// Creates a new argument detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn check_call(&self, call: &CallExpr, cx: &mut DetectorContext<'_>) {
        if cx.tracker.is_declaration_line(cx.position(call.span)) {
            trace!("Call on constant line {} skipped", call.span.line);
            return;
        }

        if let Some(name) = call.qualified_name() {
            if cx.policy.is_ignored_function(&name) {
                trace!("Call to ignored function {name} skipped");
                return;
            }
        }

        for (i, arg) in call.args.iter().enumerate() {
            match arg {
                Expr::Literal(lit) if cx.is_magic(lit) => {
                    let after_chan = i > 0 && matches!(call.args[i - 1], Expr::ChanType(_));
                    if i == 0 || after_chan {
                        cx.report(lit, self.check_kind());
                    }
                }
                Expr::Binary(bin) => report_literal_operands(bin, cx, self.check_kind()),
                _ => {}
            }
        }
    }
}

impl Detector for ArgumentDetector {
    fn check_kind(&self) -> CheckKind {
        CheckKind::Argument
    }

    fn description(&self) -> &'static str {
        "Magic numbers passed as function call arguments"
    }

    fn node_filter(&self) -> &'static [NodeKind] {
        &[NodeKind::ConstDecl, NodeKind::Call]
    }

    fn check(&self, node: &Node, cx: &mut DetectorContext<'_>) {
        match node {
            Node::ConstDecl(decl) => cx.tracker.record_declaration(cx.position(decl.keyword)),
            Node::Call(call) => self.check_call(call, cx),
            _ => {}
        }
    }
}
