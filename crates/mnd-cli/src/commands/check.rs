//! Check command implementation.

use anyhow::{Context, Result};
use clap::Args;
use mnd_checks::{all_detectors, selected_detectors};
use mnd_core::{Analyzer, CheckKind, Config};
use mnd_go::GoParser;
use std::path::PathBuf;

use crate::OutputFormat;

/// Arguments of `mnd check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Path to analyze (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Only run specific checks (comma-separated names or codes)
    #[arg(long, value_delimiter = ',')]
    pub checks: Vec<String>,

    /// Exclude patterns (can be specified multiple times)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Additional numbers to ignore (comma-separated regexes)
    #[arg(long, value_delimiter = ',')]
    pub ignored_numbers: Vec<String>,

    /// Additional functions to ignore, as `pkg.Func` (comma-separated regexes)
    #[arg(long, value_delimiter = ',')]
    pub ignored_functions: Vec<String>,

    /// Additional file paths to ignore (comma-separated regexes)
    #[arg(long, value_delimiter = ',')]
    pub ignored_files: Vec<String>,
}

/// Runs the check command.
///
/// Returns `false` if any finding reaches the configured `fail_on` severity.
pub fn run(args: &CheckArgs, mut config: Config) -> Result<bool> {
    apply_overrides(&mut config, args);
    let threshold = config.fail_threshold();

    let detectors = if args.checks.is_empty() {
        all_detectors()
    } else {
        selected_detectors(&parse_checks(&args.checks)?)
    };

    let mut builder = Analyzer::builder()
        .root(&args.path)
        .parser(GoParser::new())
        .config(config)
        .excludes(args.exclude.iter().cloned());

    for detector in detectors {
        builder = builder.detector_box(detector);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {:?} with {} checks",
        args.path,
        analyzer.detector_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, args.format, analyzer.root())?;

    Ok(!result.has_violations_at(threshold))
}

/// Appends command-line ignore entries to the configured ones.
fn apply_overrides(config: &mut Config, args: &CheckArgs) {
    let non_empty = |values: &[String]| {
        values
            .iter()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
    };

    config.ignore.numbers.extend(non_empty(&args.ignored_numbers));
    config
        .ignore
        .functions
        .extend(non_empty(&args.ignored_functions));
    config.ignore.files.extend(non_empty(&args.ignored_files));
}

fn parse_checks(names: &[String]) -> Result<Vec<CheckKind>> {
    names
        .iter()
        .filter(|name| !name.trim().is_empty())
        .map(|name| name.parse::<CheckKind>().map_err(anyhow::Error::from))
        .collect::<Result<Vec<_>>>()
        .context("Invalid --checks value")
}
