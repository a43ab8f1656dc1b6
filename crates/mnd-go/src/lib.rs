//! # mnd-go
//!
//! Go front end for magic number detection.
//!
//! Parses Go source with Tree-sitter and lowers the syntax tree into the
//! `mnd-core` node stream:
//!
//! - [`GoParser`] implements [`mnd_core::SourceParser`] for `.go` files

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod lower;
pub mod parser;

pub use parser::GoParser;
