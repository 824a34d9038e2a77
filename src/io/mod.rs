//! Output helpers.
//!
//! - agreement download (PDF artifact) and JSON quote export (`export`)

pub mod export;

pub use export::*;
