//! # mnd-checks
//!
//! Built-in magic number detectors.
//!
//! Each detector inspects one syntactic context and reports numeric
//! literals that are not bound to a named constant.
//!
//! ## Available Checks
//!
//! | Code | Name | Context |
//! |------|------|---------|
//! | MND001 | `argument` | Call arguments |
//! | MND002 | `assign` | Right-hand side of assignments, composite literal values |
//! | MND003 | `case` | Switch case values |
//! | MND004 | `condition` | Operands of `if` conditions |
//! | MND005 | `operation` | Operands of arithmetic and logical expressions |
//! | MND006 | `return` | Returned values |
//!
//! ## Usage
//!
//! ```ignore
//! use mnd_core::Analyzer;
//! use mnd_checks::all_detectors;
//! use mnd_go::GoParser;
//!
//! let mut builder = Analyzer::builder().root("./").parser(GoParser::new());
//! for detector in all_detectors() {
//!     builder = builder.detector_box(detector);
//! }
//! let result = builder.build()?.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod argument;
mod assign;
mod case;
mod condition;
mod operands;
mod operation;
mod presets;
mod returns;

pub use argument::ArgumentDetector;
pub use assign::AssignDetector;
pub use case::CaseDetector;
pub use condition::ConditionDetector;
pub use operation::OperationDetector;
pub use presets::{all_detectors, detector_for, selected_detectors};
pub use returns::ReturnDetector;

/// Re-export core types for convenience.
pub use mnd_core::{CheckKind, Detector, Severity, Violation};
