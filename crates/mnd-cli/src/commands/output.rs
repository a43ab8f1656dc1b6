//! Shared output formatting for lint results.

use anyhow::{Context, Result};
use miette::{NamedSource, Report};
use mnd_core::{LintResult, Severity, Violation, ViolationDiagnostic};
use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is the analyzed path, used to read sources for `pretty` output.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(result)),
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Compact => print!("{}", render_compact(result)),
        OutputFormat::Pretty => print_pretty(result, root),
    }
    Ok(())
}

fn severity_indicator(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn render_text(result: &LintResult) -> String {
    let (errors, warnings, infos) = result.count_by_severity();
    let mut out = String::new();

    for violation in &result.violations {
        let _ = writeln!(
            out,
            "{} {} at {}:{}:{}",
            violation.code,
            violation.check,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        let _ = writeln!(
            out,
            "  {}: {}",
            severity_indicator(violation.severity),
            violation.message
        );
        if let Some(suggestion) = &violation.suggestion {
            let _ = writeln!(out, "  = help: {}", suggestion.message);
        }
        out.push('\n');
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    let _ = writeln!(
        out,
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );
    out
}

fn render_json(result: &LintResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize results")
}

fn render_compact(result: &LintResult) -> String {
    let mut out = String::new();
    for violation in &result.violations {
        let _ = writeln!(out, "{violation}");
    }
    out
}

/// Resolves the file a finding was reported in.
fn source_path(root: &Path, violation: &Violation) -> PathBuf {
    if root.is_file() {
        root.to_path_buf()
    } else {
        root.join(&violation.location.file)
    }
}

fn print_pretty(result: &LintResult, root: &Path) {
    for violation in &result.violations {
        let diagnostic = ViolationDiagnostic::from(violation);
        let path = source_path(root, violation);
        let report = match std::fs::read_to_string(&path) {
            Ok(content) => Report::new(diagnostic).with_source_code(NamedSource::new(
                violation.location.file.display().to_string(),
                content,
            )),
            Err(e) => {
                tracing::debug!("Source unavailable for {}: {}", path.display(), e);
                Report::new(diagnostic)
            }
        };
        println!("{report:?}");
    }

    let (errors, warnings, infos) = result.count_by_severity();
    println!(
        "Found {} error(s), {} warning(s), {} info(s) in {} file(s)",
        errors, warnings, infos, result.files_checked
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnd_core::{CheckKind, Location, Suggestion};

    fn sample() -> LintResult {
        let mut result = LintResult::new();
        result.files_checked = 2;
        result.violations.push(
            Violation::new(
                CheckKind::Argument,
                "30",
                Severity::Warning,
                Location::new(PathBuf::from("pkg/client.go"), 12, 14).with_span(190, 2),
            )
            .with_suggestion(Suggestion::new("Extract 30 into a named constant")),
        );
        result.violations.push(Violation::new(
            CheckKind::Return,
            "404",
            Severity::Error,
            Location::new(PathBuf::from("pkg/server.go"), 40, 10),
        ));
        result
    }

    #[test]
    fn compact_output() {
        insta::assert_snapshot!(render_compact(&sample()), @r"
        pkg/client.go:12:14: warning [MND001] Magic number: 30, in <argument> detected
        pkg/server.go:40:10: error [MND006] Magic number: 404, in <return> detected
        ");
    }

    #[test]
    fn text_output_includes_help_and_summary() {
        let text = render_text(&sample());
        assert!(text.contains("MND001 argument at pkg/client.go:12:14"));
        assert!(text.contains("= help: Extract 30 into a named constant"));
        assert!(text.contains("Found 1 error(s), 1 warning(s), 0 info(s) in 2 file(s)"));
    }

    #[test]
    fn json_output_is_structured() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&sample()).unwrap()).unwrap();
        assert_eq!(json["files_checked"], 2);
        assert_eq!(json["violations"][0]["check"], "argument");
        assert_eq!(json["violations"][0]["code"], "MND001");
        assert_eq!(json["violations"][1]["severity"], "error");
        assert_eq!(json["violations"][1]["location"]["line"], 40);
    }

    #[test]
    fn source_path_for_file_root() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let v = &sample().violations[0];
        assert_eq!(source_path(tmp.path(), v), tmp.path());
        assert_eq!(
            source_path(Path::new("/work"), v),
            PathBuf::from("/work/pkg/client.go")
        );
    }
}
