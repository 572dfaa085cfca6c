//! Core contracts for hearth.
//!
//! This crate contains:
//! - The `MMM-YY` period label codec and its total ordering
//! - Metric record and category models
//! - Range filtering and default range selection over metric collections
//!
//! Everything here is pure, synchronous computation over in-memory
//! collections; storage and transport live in the sibling crates.

pub mod domain;
pub mod error;
pub mod filter;

pub use domain::{format_label, Category, MetricRecord, Period, PeriodRange, PERIOD_FIELD};
pub use error::ValidationError;
pub use filter::{default_range, filter_by_range, FilterOutcome};
