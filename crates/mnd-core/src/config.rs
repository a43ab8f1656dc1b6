//! Configuration types for mnd.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::types::{CheckKind, Severity};

/// Top-level configuration for mnd.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Severity threshold that makes `mnd check` exit non-zero (default: warning).
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Ignore lists for numbers, functions, and files.
    #[serde(default)]
    pub ignore: IgnoreConfig,

    /// Per-check configurations, keyed by check name.
    #[serde(default)]
    pub checks: HashMap<String, CheckConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or names an unknown check.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        for name in config.checks.keys() {
            name.parse::<CheckKind>()
                .map_err(|e| ConfigError::Parse {
                    message: e.to_string(),
                })?;
        }
        Ok(config)
    }

    fn check_config(&self, check: CheckKind) -> Option<&CheckConfig> {
        self.checks
            .iter()
            .find(|(name, _)| name.parse::<CheckKind>().ok() == Some(check))
            .map(|(_, c)| c)
    }

    /// Checks if a check is enabled (default: enabled).
    #[must_use]
    pub fn is_check_enabled(&self, check: CheckKind) -> bool {
        self.check_config(check)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a check.
    #[must_use]
    pub fn check_severity(&self, check: CheckKind) -> Option<Severity> {
        self.check_config(check).and_then(|c| c.severity)
    }

    /// Severity threshold at which findings fail the run.
    #[must_use]
    pub fn fail_threshold(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Warning)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Maximum number of parallel file analyses.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: vec!["**/vendor/**".to_string(), "**/testdata/**".to_string()],
            respect_gitignore: true,
            parallelism: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

/// Ignore lists. Entries are regular expressions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Literal values never reported (full match).
    #[serde(default = "default_ignored_numbers")]
    pub numbers: Vec<String>,

    /// Qualified call targets (`pkg.Func`) whose arguments are never reported (full match).
    #[serde(default = "default_ignored_functions")]
    pub functions: Vec<String>,

    /// File paths excluded from analysis (partial match).
    #[serde(default)]
    pub files: Vec<String>,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            numbers: default_ignored_numbers(),
            functions: default_ignored_functions(),
            files: Vec::new(),
        }
    }
}

fn default_ignored_numbers() -> Vec<String> {
    ["0", r"0\.0", "1", r"1\.0"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_ignored_functions() -> Vec<String> {
    [
        r"time\.Date",
        r"strconv\.FormatInt",
        r"strconv\.FormatUint",
        r"strconv\.FormatFloat",
        r"strconv\.ParseInt",
        r"strconv\.ParseUint",
        r"strconv\.ParseFloat",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Per-check configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Whether this check is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this check.
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// An ignore entry is not a valid regular expression.
    #[error("Invalid ignore pattern `{pattern}`: {message}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Regex compilation error.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.checks.is_empty());
        assert_eq!(config.fail_threshold(), Severity::Warning);
        assert!(CheckKind::ALL.iter().all(|c| config.is_check_enabled(*c)));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
fail_on = "error"

[analyzer]
root = "./cmd"
exclude = ["**/generated/**"]
parallelism = 2

[ignore]
numbers = ["0", "2", "100"]
functions = ['math\..*']
files = ['_test\.go$']

[checks.argument]
severity = "error"

[checks.return]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("./cmd"));
        assert_eq!(config.analyzer.parallelism, Some(2));
        assert_eq!(config.fail_threshold(), Severity::Error);
        assert_eq!(config.ignore.numbers, vec!["0", "2", "100"]);
        assert_eq!(config.ignore.files, vec![r"_test\.go$"]);
        assert_eq!(
            config.check_severity(CheckKind::Argument),
            Some(Severity::Error)
        );
        assert!(config.is_check_enabled(CheckKind::Argument));
        assert!(!config.is_check_enabled(CheckKind::Return));
        assert!(config.is_check_enabled(CheckKind::Case));
    }

    #[test]
    fn unspecified_ignore_lists_keep_defaults() {
        let config = Config::parse("[ignore]\nfiles = ['gen']\n").expect("Failed to parse");
        assert_eq!(config.ignore.numbers, default_ignored_numbers());
        assert_eq!(config.ignore.functions, default_ignored_functions());
    }

    #[test]
    fn assignment_alias_is_accepted() {
        let config =
            Config::parse("[checks.assignment]\nenabled = false\n").expect("Failed to parse");
        assert!(!config.is_check_enabled(CheckKind::Assign));
    }

    #[test]
    fn unknown_check_is_rejected() {
        let err = Config::parse("[checks.loops]\nenabled = true\n").unwrap_err();
        assert!(err.to_string().contains("unknown check: loops"));
    }
}
