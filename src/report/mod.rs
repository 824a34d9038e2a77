//! Terminal-facing formatting: money/mileage values and quote summaries.

pub mod format;

pub use format::*;
