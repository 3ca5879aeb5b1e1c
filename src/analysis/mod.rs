//! Analysis modules.
//!
//! Grouping and statistics over loaded employee records.

pub mod aggregator;

pub use aggregator::*;
