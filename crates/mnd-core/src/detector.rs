//! Detector trait for context-specific magic number checks.

use crate::classifier::is_magic_literal;
use crate::context::FileContext;
use crate::policy::IgnorePolicy;
use crate::sink::DiagnosticSink;
use crate::syntax::{Literal, Node, NodeKind, Span};
use crate::tracker::{ConstantTracker, SourcePos};
use crate::types::CheckKind;

/// A magic number check for one syntactic category.
///
/// The analyzer hands every node whose kind appears in [`node_filter`] to
/// [`check`], in source pre-order.
///
/// # Example
///
/// ```ignore
/// use mnd_core::{CheckKind, Detector, DetectorContext, Node, NodeKind};
///
/// pub struct ReturnDetector;
///
/// impl Detector for ReturnDetector {
///     fn check_kind(&self) -> CheckKind { CheckKind::Return }
///     fn node_filter(&self) -> &'static [NodeKind] { &[NodeKind::Return] }
///
///     fn check(&self, node: &Node, cx: &mut DetectorContext<'_>) {
///         if let Node::Return(ret) = node {
///             for lit in ret.results.iter().filter_map(|e| e.as_literal()) {
///                 cx.report_if_magic(lit, self.check_kind());
///             }
///         }
///     }
/// }
/// ```
///
/// [`node_filter`]: Detector::node_filter
/// [`check`]: Detector::check
pub trait Detector: Send + Sync {
    /// Category this detector reports under.
    fn check_kind(&self) -> CheckKind;

    /// Returns the check name (e.g., "argument").
    fn name(&self) -> &'static str {
        self.check_kind().name()
    }

    /// Returns the check code (e.g., "MND001").
    fn code(&self) -> &'static str {
        self.check_kind().code()
    }

    /// Returns a brief description of what this detector checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Node kinds this detector wants to see.
    fn node_filter(&self) -> &'static [NodeKind];

    /// Inspects one node, reporting findings through `cx`.
    fn check(&self, node: &Node, cx: &mut DetectorContext<'_>);
}

/// Type alias for boxed Detector trait objects.
pub type DetectorBox = Box<dyn Detector>;

/// Everything a detector may consult or report to while checking a node.
pub struct DetectorContext<'a> {
    /// The file being analyzed.
    pub file: &'a FileContext<'a>,
    /// Ignore policy for values and call targets.
    pub policy: &'a dyn IgnorePolicy,
    /// Constant-declaration lines of the current run.
    pub tracker: &'a ConstantTracker,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> DetectorContext<'a> {
    /// Creates a context.
    pub fn new(
        file: &'a FileContext<'a>,
        policy: &'a dyn IgnorePolicy,
        tracker: &'a ConstantTracker,
        sink: &'a mut dyn DiagnosticSink,
    ) -> Self {
        Self {
            file,
            policy,
            tracker,
            sink,
        }
    }

    /// Resolves a span in the current file to a run-wide position.
    #[must_use]
    pub fn position(&self, span: Span) -> SourcePos {
        self.file.position(span)
    }

    /// Classifies a literal against the ignore policy.
    #[must_use]
    pub fn is_magic(&self, literal: &Literal) -> bool {
        is_magic_literal(literal, self.policy)
    }

    /// Reports a literal unconditionally.
    pub fn report(&mut self, literal: &Literal, check: CheckKind) {
        self.sink.report(literal.span, &literal.text, check);
    }

    /// Reports a literal if it classifies as magic. Returns whether it did.
    pub fn report_if_magic(&mut self, literal: &Literal, check: CheckKind) -> bool {
        let magic = self.is_magic(literal);
        if magic {
            self.report(literal, check);
        }
        magic
    }
}
