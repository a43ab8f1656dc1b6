//! Utility functions for detector implementations.

pub mod allowance;

#[doc(inline)]
pub use allowance::{check_allow, AllowCheck};
