//! Core analyzer for orchestrating magic number detection.

use crate::config::Config;
use crate::context::FileContext;
use crate::detector::{DetectorBox, DetectorContext};
use crate::parser::{ParseError, SourceParser};
use crate::policy::IgnoreRules;
use crate::sink::FindingCollector;
use crate::syntax::Node;
use crate::tracker::{ConstantTracker, FileId};
use crate::types::{LintResult, Violation};
use crate::Detector;

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Directory walk error.
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] ignore::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Worker pool could not be created.
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// No source parser was registered.
    #[error("No source parser configured")]
    MissingParser,
}

fn parse_failure(path: &Path, e: ParseError) -> AnalyzerError {
    AnalyzerError::Parse {
        path: path.to_path_buf(),
        message: match e.line {
            Some(line) => format!("{} (line {line})", e.message),
            None => e.message,
        },
    }
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    detectors: Vec<DetectorBox>,
    parser: Option<Box<dyn SourceParser>>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a detector to the analyzer.
    #[must_use]
    pub fn detector<D: Detector + 'static>(mut self, detector: D) -> Self {
        self.detectors.push(Box::new(detector));
        self
    }

    /// Adds a boxed detector to the analyzer.
    #[must_use]
    pub fn detector_box(mut self, detector: DetectorBox) -> Self {
        self.detectors.push(detector);
        self
    }

    /// Sets the source parser.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser was set, the current directory cannot
    /// be resolved, or an exclude or ignore pattern is invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let parser = self.parser.ok_or(AnalyzerError::MissingParser)?;
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        // Merge exclude patterns from config
        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());
        let excludes = exclude_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let policy = IgnoreRules::from_config(&config)?;

        Ok(Analyzer {
            root,
            detectors: self.detectors,
            parser,
            excludes,
            policy,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates detector execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    detectors: Vec<DetectorBox>,
    parser: Box<dyn SourceParser>,
    excludes: Vec<glob::Pattern>,
    policy: IgnoreRules,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered detectors that are enabled.
    #[must_use]
    pub fn detector_count(&self) -> usize {
        self.active_detectors().count()
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyzes all files under the root and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, or a file fails
    /// to parse while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!(
            "Starting {} analysis at {:?}",
            self.parser.language_id(),
            self.root
        );

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let tracker = ConstantTracker::new();
        let run = || -> Vec<Result<Vec<Violation>, AnalyzerError>> {
            files
                .par_iter()
                .enumerate()
                .map(|(id, path)| self.analyze_file(FileId(id), path, &tracker))
                .collect()
        };

        let outcomes = match self.config.analyzer.parallelism {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(run),
            None => run(),
        };

        let mut result = LintResult::new();
        for outcome in outcomes {
            match outcome {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("Failed to parse {}: {}", path.display(), message);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, message });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} findings in {} files ({} constant lines)",
            result.violations.len(),
            result.files_checked,
            tracker.len()
        );

        Ok(result)
    }

    /// Analyzes one in-memory source with a fresh constant tracker.
    ///
    /// `path` is only used for reporting; it is made relative to the root
    /// when possible.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] if the source cannot be parsed, or
    /// has syntax errors while `fail_on_parse_error` is set.
    pub fn analyze_source(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        let tracker = ConstantTracker::new();
        let mut violations = self.check_source(FileId::default(), path, content, &tracker)?;
        violations.sort_by_key(|v| (v.location.line, v.location.column));
        Ok(violations)
    }

    fn analyze_file(
        &self,
        id: FileId,
        path: &Path,
        tracker: &ConstantTracker,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        self.check_source(id, path, &content, tracker)
    }

    fn check_source(
        &self,
        id: FileId,
        path: &Path,
        content: &str,
        tracker: &ConstantTracker,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        let parsed = self
            .parser
            .parse(content)
            .map_err(|e| parse_failure(path, e))?;

        if let Some(first) = parsed.syntax_errors.first() {
            if self.fail_on_parse_error {
                return Err(parse_failure(path, first.clone()));
            }
            warn!(
                "{}: skipping {} unparsable region(s), first at line {}",
                path.display(),
                parsed.syntax_errors.len(),
                first.line.map_or_else(|| "?".to_owned(), |l| l.to_string())
            );
        }

        let ctx = FileContext::new(id, path, content, &self.root);
        let violations = self.run_detectors(&ctx, &parsed.nodes, tracker);
        Ok(self.apply_severity_override(violations))
    }

    /// Feeds every node to each enabled detector whose filter accepts it.
    fn run_detectors(
        &self,
        ctx: &FileContext<'_>,
        nodes: &[Node],
        tracker: &ConstantTracker,
    ) -> Vec<Violation> {
        let detectors: Vec<&DetectorBox> = self.active_detectors().collect();
        let mut sink = FindingCollector::new(ctx);

        for node in nodes {
            let kind = node.kind();
            for detector in &detectors {
                if !detector.node_filter().contains(&kind) {
                    continue;
                }
                trace!(
                    "{} <- {:?} at line {}",
                    detector.name(),
                    kind,
                    node.span().line
                );
                let mut cx = DetectorContext::new(ctx, &self.policy, tracker, &mut sink);
                detector.check(node, &mut cx);
            }
        }

        sink.into_violations()
    }

    fn active_detectors(&self) -> impl Iterator<Item = &DetectorBox> {
        self.detectors.iter().filter(|d| {
            let enabled = self.config.is_check_enabled(d.check_kind());
            if !enabled {
                debug!("Skipping disabled check: {}", d.name());
            }
            enabled
        })
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(&self, mut violations: Vec<Violation>) -> Vec<Violation> {
        for v in &mut violations {
            if let Some(severity) = self.config.check_severity(v.check) {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers all source files the parser handles.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let extensions = self.parser.extensions();

        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| format!(".{e}"))
                .unwrap_or_default();
            if !extensions.contains(&ext.as_str()) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path is excluded by a glob or an ignored-file pattern.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);

        if self.policy.is_ignored_file(relative) {
            return true;
        }

        self.excludes
            .iter()
            .any(|pattern| pattern.matches_path(path) || pattern.matches_path(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParsedSource;
    use crate::syntax::{ConstDecl, NodeKind, Span};
    use crate::types::CheckKind;

    /// Emits one constant declaration per line starting with `const`.
    /// `syntax error` fails outright; a `???` line is a recoverable error.
    struct LineParser;

    impl SourceParser for LineParser {
        fn language_id(&self) -> &'static str {
            "lines"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &[".go"]
        }

        fn parse(&self, source: &str) -> Result<ParsedSource, ParseError> {
            if source.contains("syntax error") {
                return Err(ParseError::new("unexpected token").at_line(1));
            }
            let mut parsed = ParsedSource::default();
            for (i, line) in source.lines().enumerate() {
                if line.starts_with("???") {
                    parsed
                        .syntax_errors
                        .push(ParseError::new("unexpected ???").at_line(i + 1));
                } else if line.starts_with("const") {
                    parsed.nodes.push(Node::ConstDecl(ConstDecl {
                        keyword: Span::new(i + 1, 1, 0, 5),
                    }));
                }
            }
            Ok(parsed)
        }
    }

    /// Reports every constant keyword as a return-check finding.
    struct EchoDetector;

    impl Detector for EchoDetector {
        fn check_kind(&self) -> CheckKind {
            CheckKind::Return
        }

        fn node_filter(&self) -> &'static [NodeKind] {
            &[NodeKind::ConstDecl]
        }

        fn check(&self, node: &Node, cx: &mut DetectorContext<'_>) {
            if let Node::ConstDecl(decl) = node {
                cx.tracker.record_declaration(cx.position(decl.keyword));
                let lit = crate::syntax::Literal::new(
                    crate::syntax::LiteralKind::Int,
                    "7",
                    decl.keyword,
                );
                cx.report_if_magic(&lit, self.check_kind());
            }
        }
    }

    fn analyzer(config: Config) -> Analyzer {
        Analyzer::builder()
            .root(".")
            .parser(LineParser)
            .detector(EchoDetector)
            .config(config)
            .build()
            .expect("Failed to build analyzer")
    }

    #[test]
    fn test_builder_requires_parser() {
        let err = Analyzer::builder().root(".").build().err();
        assert!(matches!(err, Some(AnalyzerError::MissingParser)));
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root("/foo")
            .parser(LineParser)
            .exclude("**/third_party/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/foo/vendor/lib.go")));
        assert!(analyzer.should_exclude(Path::new("/foo/third_party/x/y.go")));
        assert!(!analyzer.should_exclude(Path::new("/foo/pkg/lib.go")));
    }

    #[test]
    fn test_ignored_files_are_excluded() {
        let config = Config::parse("[ignore]\nfiles = ['_test\\.go$']\n").unwrap();
        let analyzer = Analyzer::builder()
            .root("/foo")
            .parser(LineParser)
            .config(config)
            .build()
            .unwrap();

        assert!(analyzer.should_exclude(Path::new("/foo/pkg/a_test.go")));
        assert!(!analyzer.should_exclude(Path::new("/foo/pkg/a.go")));
    }

    #[test]
    fn test_invalid_exclude_glob() {
        let err = Analyzer::builder()
            .parser(LineParser)
            .exclude("[")
            .build()
            .err();
        assert!(matches!(err, Some(AnalyzerError::Glob(_))));
    }

    #[test]
    fn test_analyze_source_dispatches_filtered_nodes() {
        let violations = analyzer(Config::default())
            .analyze_source(Path::new("main.go"), "package main\nconst a = 1\nconst b = 2\n")
            .unwrap();
        let lines: Vec<usize> = violations.iter().map(|v| v.location.line).collect();
        assert_eq!(lines, vec![2, 3]);
        assert!(violations.iter().all(|v| v.check == CheckKind::Return));
    }

    #[test]
    fn test_disabled_check_is_skipped() {
        let config = Config::parse("[checks.return]\nenabled = false\n").unwrap();
        let analyzer = analyzer(config);
        assert_eq!(analyzer.detector_count(), 0);
        let violations = analyzer
            .analyze_source(Path::new("main.go"), "const a = 1\n")
            .unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn test_severity_override() {
        let config = Config::parse("[checks.return]\nseverity = \"error\"\n").unwrap();
        let violations = analyzer(config)
            .analyze_source(Path::new("main.go"), "const a = 1\n")
            .unwrap();
        assert_eq!(violations[0].severity, crate::Severity::Error);
    }

    #[test]
    fn test_parse_error_surfaces_from_analyze_source() {
        let err = analyzer(Config::default())
            .analyze_source(Path::new("bad.go"), "syntax error")
            .unwrap_err();
        assert!(err.to_string().contains("unexpected token (line 1)"));
    }

    #[test]
    fn test_recoverable_syntax_errors_keep_remaining_findings() {
        let source = "const a = 1\n???\nconst b = 2\n";
        let violations = analyzer(Config::default())
            .analyze_source(Path::new("partial.go"), source)
            .unwrap();
        let lines: Vec<usize> = violations.iter().map(|v| v.location.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn test_recoverable_syntax_errors_fail_when_requested() {
        let analyzer = Analyzer::builder()
            .root(".")
            .parser(LineParser)
            .detector(EchoDetector)
            .fail_on_parse_error(true)
            .build()
            .unwrap();
        let err = analyzer
            .analyze_source(Path::new("partial.go"), "const a = 1\n???\n")
            .unwrap_err();
        assert!(err.to_string().contains("unexpected ??? (line 2)"));
    }

    #[test]
    fn test_analyze_walks_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.go"), "const x = 1\n").unwrap();
        std::fs::create_dir(dir.path().join("vendor")).unwrap();
        std::fs::write(dir.path().join("vendor/v.go"), "const y = 1\n").unwrap();
        std::fs::write(dir.path().join("bad.go"), "syntax error\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "const z = 1\n").unwrap();

        let analyzer = Analyzer::builder()
            .root(dir.path())
            .parser(LineParser)
            .detector(EchoDetector)
            .build()
            .unwrap();
        let result = analyzer.analyze().unwrap();

        assert_eq!(result.files_checked, 1);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].location.file, PathBuf::from("a.go"));
    }

    #[test]
    fn test_fail_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.go"), "syntax error\n").unwrap();

        let analyzer = Analyzer::builder()
            .root(dir.path())
            .parser(LineParser)
            .fail_on_parse_error(true)
            .build()
            .unwrap();
        assert!(matches!(
            analyzer.analyze(),
            Err(AnalyzerError::Parse { .. })
        ));
    }

    #[test]
    fn test_bounded_parallelism() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..6 {
            std::fs::write(dir.path().join(format!("f{i}.go")), "const x = 1\n").unwrap();
        }
        let config = Config::parse("[analyzer]\nparallelism = 2\n").unwrap();
        let analyzer = Analyzer::builder()
            .root(dir.path())
            .parser(LineParser)
            .detector(EchoDetector)
            .config(config)
            .build()
            .unwrap();
        let result = analyzer.analyze().unwrap();
        assert_eq!(result.files_checked, 6);
        assert_eq!(result.violations.len(), 6);
    }
}
