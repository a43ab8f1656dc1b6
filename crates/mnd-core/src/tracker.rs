//! Run-scoped index of constant-declaration lines.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

/// Identifies a source file within one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FileId(pub usize);

/// A position in a source file. Only `file` and `line` take part in lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePos {
    /// File the position belongs to.
    pub file: FileId,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

/// Lines known to hold a constant declaration.
///
/// One instance is shared by every detector of a run, possibly across
/// worker threads. Marks are never removed. Lookups take the shared side of
/// the lock; recording takes the exclusive side.
///
/// Nothing orders a declaration before a use on another worker: a call on a
/// constant's line may be evaluated before the line is recorded.
#[derive(Debug, Default)]
pub struct ConstantTracker {
    lines: RwLock<HashSet<(FileId, usize)>>,
}

impl ConstantTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the line containing `pos` as a constant declaration.
    pub fn record_declaration(&self, pos: SourcePos) {
        let mut lines = self.lines.write().unwrap_or_else(PoisonError::into_inner);
        lines.insert((pos.file, pos.line));
    }

    /// Returns whether the line containing `pos` was marked.
    #[must_use]
    pub fn is_declaration_line(&self, pos: SourcePos) -> bool {
        let lines = self.lines.read().unwrap_or_else(PoisonError::into_inner);
        lines.contains(&(pos.file, pos.line))
    }

    /// Number of marked lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no line has been marked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
