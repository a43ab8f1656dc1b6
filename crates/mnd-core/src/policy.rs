//! Ignore policy: which literal values and call targets are never flagged.

use regex::Regex;
use std::path::Path;

use crate::config::{Config, ConfigError, IgnoreConfig};

/// Answers whether a literal value or a call target is excluded from checks.
pub trait IgnorePolicy: Send + Sync {
    /// Returns true if a literal with this text must not be reported.
    fn is_ignored_number(&self, text: &str) -> bool;

    /// Returns true if calls to `qualified_name` (e.g. `time.Date`) are skipped.
    fn is_ignored_function(&self, qualified_name: &str) -> bool;
}

/// Compiled ignore lists from [`IgnoreConfig`].
///
/// Number and function patterns must match the whole text. File patterns
/// may match anywhere in the path.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    numbers: Vec<Regex>,
    functions: Vec<Regex>,
    files: Vec<Regex>,
}

impl IgnoreRules {
    /// Compiles the ignore section of a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] if any entry is not a valid regex.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::compile(&config.ignore)
    }

    /// Compiles an ignore section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] if any entry is not a valid regex.
    pub fn compile(ignore: &IgnoreConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            numbers: compile_all(&ignore.numbers, true)?,
            functions: compile_all(&ignore.functions, true)?,
            files: compile_all(&ignore.files, false)?,
        })
    }

    /// Returns true if the file at `relative_path` is excluded from analysis.
    #[must_use]
    pub fn is_ignored_file(&self, relative_path: &Path) -> bool {
        let path = relative_path.to_string_lossy();
        self.files.iter().any(|re| re.is_match(&path))
    }
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::compile(&IgnoreConfig::default()).unwrap_or(Self {
            numbers: Vec::new(),
            functions: Vec::new(),
            files: Vec::new(),
        })
    }
}

impl IgnorePolicy for IgnoreRules {
    fn is_ignored_number(&self, text: &str) -> bool {
        let plain = text.replace('_', "");
        self.numbers
            .iter()
            .any(|re| re.is_match(text) || re.is_match(&plain))
    }

    fn is_ignored_function(&self, qualified_name: &str) -> bool {
        self.functions.iter().any(|re| re.is_match(qualified_name))
    }
}

fn compile_all(patterns: &[String], anchored: bool) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            let source = if anchored {
                format!("^(?:{pattern})$")
            } else {
                pattern.clone()
            };
            Regex::new(&source).map_err(|e| ConfigError::Pattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })
        })
        .collect()
}
