//! # mnd-core
//!
//! Core engine for detecting magic numbers in source code.
//!
//! This crate is language agnostic. A front end implementing
//! [`SourceParser`] lowers source files into a stream of [`Node`]s, and
//! [`Detector`]s inspect those nodes for numeric literals used in place of
//! named constants. It includes:
//!
//! - [`is_magic`] for classifying literals against an [`IgnorePolicy`]
//! - [`ConstantTracker`] for suppressing findings on constant declarations
//! - [`Detector`] trait for context-specific checks
//! - [`Analyzer`] for orchestrating detection over a source tree
//! - [`Violation`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use mnd_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./")
//!     .parser(GoParser::new())
//!     .detector(ArgumentDetector)
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod classifier;
mod config;
mod context;
mod detector;
mod parser;
mod policy;
mod sink;
pub mod syntax;
mod tracker;
mod types;

/// Utility modules for detector implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use classifier::{is_magic, is_magic_literal};
pub use config::{AnalyzerConfig, CheckConfig, Config, ConfigError, IgnoreConfig};
pub use context::FileContext;
pub use detector::{Detector, DetectorBox, DetectorContext};
pub use parser::{ParseError, ParsedSource, SourceParser};
pub use policy::{IgnorePolicy, IgnoreRules};
pub use sink::{DiagnosticSink, FindingCollector};
pub use syntax::{Expr, Literal, LiteralKind, Node, NodeKind, Span};
pub use tracker::{ConstantTracker, FileId, SourcePos};
pub use types::{
    CheckKind, LintResult, Location, Severity, Suggestion, UnknownCheck, Violation,
    ViolationDiagnostic,
};
pub use utils::allowance::AllowCheck;
