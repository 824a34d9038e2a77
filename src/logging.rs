//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set; otherwise `info`, or `debug` with `--verbose`.
//! The interactive form owns the terminal, so without `--log-file` no
//! subscriber is installed for it at all.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink<'a> {
    File(&'a Path),
    Stderr,
    Disabled,
}

impl<'a> LogSink<'a> {
    pub fn choose(log_file: Option<&'a Path>, interactive: bool) -> Self {
        match (log_file, interactive) {
            (Some(path), _) => Self::File(path),
            (None, true) => Self::Disabled,
            (None, false) => Self::Stderr,
        }
    }
}

fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber for this process.
pub fn init(sink: LogSink<'_>, verbose: bool) -> Result<(), AppError> {
    let result = match sink {
        LogSink::Disabled => return Ok(()),
        LogSink::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter(verbose))
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
        LogSink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    AppError::new(
                        4,
                        format!("Failed to open log file '{}': {e}", path.display()),
                    )
                })?;
            tracing_subscriber::fmt()
                .with_env_filter(filter(verbose))
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    result.map_err(|e| AppError::new(4, format!("Failed to initialize logging: {e}")))
}
