//! Context types for detector execution.

use std::path::{Path, PathBuf};

use crate::syntax::Span;
use crate::tracker::{FileId, SourcePos};
use crate::types::Location;

/// Context provided to detectors for the file being analyzed.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Identifier of this file within the run.
    pub id: FileId,
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(id: FileId, path: &'a Path, content: &'a str, root: &Path) -> Self {
        // A single-file root leaves nothing after the prefix
        let relative_path = match path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
            Ok(_) => path
                .file_name()
                .map_or_else(|| path.to_path_buf(), PathBuf::from),
            Err(_) => path.to_path_buf(),
        };

        Self {
            id,
            path,
            content,
            relative_path,
        }
    }

    /// Resolves a span to a run-wide position.
    #[must_use]
    pub fn position(&self, span: Span) -> SourcePos {
        SourcePos {
            file: self.id,
            line: span.line,
            column: span.column,
        }
    }

    /// Resolves a span to a reportable location.
    #[must_use]
    pub fn location(&self, span: Span) -> Location {
        Location::new(self.relative_path.clone(), span.line, span.column)
            .with_span(span.offset, span.len)
    }
}
