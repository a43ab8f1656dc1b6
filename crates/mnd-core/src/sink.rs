//! Diagnostic sinks that receive magic number reports.

use std::path::PathBuf;
use tracing::debug;

use crate::context::FileContext;
use crate::syntax::Span;
use crate::types::{CheckKind, Location, Severity, Suggestion, Violation};
use crate::utils::allowance::check_allow;

/// Receives findings from detectors.
pub trait DiagnosticSink {
    /// Records that `literal` at `span` is a magic number in `check`'s context.
    fn report(&mut self, span: Span, literal: &str, check: CheckKind);
}

/// Collects findings for one file as [`Violation`]s.
///
/// Reports covered by a `// mnd: allow(...)` directive are dropped.
pub struct FindingCollector<'a> {
    file: &'a FileContext<'a>,
    severity: Severity,
    violations: Vec<Violation>,
}

impl<'a> FindingCollector<'a> {
    /// Creates a collector producing findings at the default severity (warning).
    #[must_use]
    pub fn new(file: &'a FileContext<'a>) -> Self {
        Self {
            file,
            severity: Severity::Warning,
            violations: Vec::new(),
        }
    }

    /// Consumes the collector, returning the findings in report order.
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl DiagnosticSink for FindingCollector<'_> {
    fn report(&mut self, span: Span, literal: &str, check: CheckKind) {
        let allow = check_allow(self.file.content, span.line, check.name());
        if allow.is_allowed() {
            debug!(
                "Suppressed {} at {}:{} ({})",
                check,
                self.file.relative_path.display(),
                span.line,
                allow.reason().unwrap_or("no reason given")
            );
            return;
        }

        self.violations.push(
            Violation::new(check, literal, self.severity, self.file.location(span))
                .with_suggestion(Suggestion::new(format!(
                    "Extract {literal} into a named constant"
                ))),
        );
    }
}

/// Bare collection without file information or directive handling.
impl DiagnosticSink for Vec<Violation> {
    fn report(&mut self, span: Span, literal: &str, check: CheckKind) {
        self.push(Violation::new(
            check,
            literal,
            Severity::Warning,
            Location::new(PathBuf::new(), span.line, span.column).with_span(span.offset, span.len),
        ));
    }
}
