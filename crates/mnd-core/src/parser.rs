//! Front-end interface for turning source text into syntax nodes.

use crate::syntax::Node;

/// Error raised by a front end that cannot lower a source file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    /// Description of the failure.
    pub message: String,
    /// Line of the first syntax error, if known (1-indexed).
    pub line: Option<usize>,
}

impl ParseError {
    /// Creates a parse error without a location.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }

    /// Attaches the line of the first syntax error.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Output of a front end: the lowered nodes plus any syntax errors it
/// recovered from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSource {
    /// Nodes in source pre-order.
    pub nodes: Vec<Node>,
    /// Syntax errors whose subtrees were left out of `nodes`.
    pub syntax_errors: Vec<ParseError>,
}

/// Language front end.
///
/// Implement this to plug a parser into the analyzer. The returned nodes
/// must be in source pre-order, so a declaration precedes the nodes nested
/// inside it.
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., `"go"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles (e.g., `&[".go"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses `source` into a pre-order node stream.
    ///
    /// Recoverable syntax errors are returned in
    /// [`ParsedSource::syntax_errors`] alongside the nodes outside them.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if no syntax tree could be produced at all.
    fn parse(&self, source: &str) -> Result<ParsedSource, ParseError>;
}
