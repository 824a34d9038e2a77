//! `shipment-agreement` library crate.
//!
//! The binary (`agreement`) is a thin wrapper around this library so that:
//!
//! - pricing and rendering are testable without a terminal
//! - the interactive form and the `quote` command share one pipeline

pub mod agreement;
pub mod app;
pub mod calc;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
pub mod shell;
pub mod tui;
