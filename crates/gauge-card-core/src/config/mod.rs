//! Card configuration.
//!
//! Strongly typed main/inner gauge configuration, the value-source
//! capability the segment engine reads through, and configuration checks.

mod source;
mod types;
mod validation;

pub use source::*;
pub use types::*;
pub use validation::*;
