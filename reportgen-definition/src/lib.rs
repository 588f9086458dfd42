//! Report definitions for reportgen
//!
//! This crate reads the JSON form of a report definition and splits it into
//! compilation units (main dataset, sub-datasets, crosstabs), each carrying
//! the [`GenerationContext`](reportgen_generator::GenerationContext) the
//! generator consumes.

pub mod error;
pub mod parse;
pub mod types;
pub mod units;

pub use error::*;
pub use parse::*;
pub use types::*;
pub use units::*;
