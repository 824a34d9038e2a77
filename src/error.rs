//! Process-level error type.
//!
//! Every module owns a precise error enum (`ConfigError`, `SubmissionError`,
//! `ExportError`, ...). At the process boundary those collapse into an
//! `AppError`: a message plus the exit code `main` returns.
//!
//! Exit codes:
//! - `2` configuration (missing file, missing keys, bad values)
//! - `3` rejected submission (validation or encoding) in non-interactive mode
//! - `4` runtime failures (terminal, file writes, logging setup)

use crate::agreement::EncodingError;
use crate::app::pipeline::{SubmissionError, ValidationError};
use crate::config::ConfigError;
use crate::io::export::ExportError;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(2, format!("Configuration error: {err}"))
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        AppError::new(3, err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        SubmissionError::from(err).into()
    }
}

impl From<EncodingError> for AppError {
    fn from(err: EncodingError) -> Self {
        SubmissionError::from(err).into()
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::new(4, err.to_string())
    }
}
