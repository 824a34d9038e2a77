//! Interactive shell state, independent of any terminal.
//!
//! ```text
//! Idle --submit(valid)--> Computed --download--> Idle
//! Idle --submit(invalid)--> Idle (error notice)
//! Computed --submit--> Computed (replaced) | Idle (error notice)
//! ```
//!
//! The TUI drives a `Shell` from key events; tests drive it directly.

use std::path::{Path, PathBuf};

use crate::app::pipeline::{self, Submission, SubmissionError};
use crate::config::Settings;
use crate::domain::{AgreementDocument, INPUT_FLOOR};
use crate::io::export::{self, ExportError};
use crate::report::success_message;

pub mod form;

pub use form::{FormField, InputError, NumberInput, ShipmentForm};

/// Where the shell is in the submit/download cycle.
#[derive(Debug, Clone)]
pub enum ShellState {
    Idle,
    /// A quote was computed and its agreement is ready to download.
    Computed(Box<Submission>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// User-visible message for the last action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

pub struct Shell<'a> {
    settings: &'a Settings,
    pub form: ShipmentForm,
    state: ShellState,
    notice: Option<Notice>,
}

impl<'a> Shell<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            form: ShipmentForm::new(settings.base_rate, INPUT_FLOOR),
            state: ShellState::Idle,
            notice: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// The computed submission, if any.
    pub fn computed(&self) -> Option<&Submission> {
        match &self.state {
            ShellState::Computed(run) => Some(run.as_ref()),
            ShellState::Idle => None,
        }
    }

    /// Apply an edited value to a form field. Invalid numbers keep the
    /// previous value and post an error notice.
    pub fn set_field(&mut self, field: FormField, text: &str) -> Result<(), InputError> {
        match self.form.set(field, text) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.notice = Some(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Run one submission with the current form values.
    ///
    /// On success the shell moves to `Computed` and returns the total. On
    /// failure it moves to `Idle` (dropping any earlier result) and posts the
    /// error as a notice.
    pub fn submit(&mut self) -> Result<f64, SubmissionError> {
        let result = pipeline::submit(
            &self.form.driver_name,
            &self.form.plate,
            self.form.mileage.value(),
            self.form.rate.value(),
            self.settings,
        );

        match result {
            Ok(run) => {
                let total = run.total();
                self.notice = Some(Notice::success(success_message(total)));
                self.state = ShellState::Computed(Box::new(run));
                Ok(total)
            }
            Err(err) => {
                self.notice = Some(Notice::error(err.to_string()));
                self.state = ShellState::Idle;
                Err(err)
            }
        }
    }

    /// Save the computed agreement into `out_dir` and return to `Idle`.
    ///
    /// Returns `Ok(None)` when there is nothing to download. A failed write
    /// keeps the computed result so the user can retry the download.
    pub fn download(&mut self, out_dir: &Path) -> Result<Option<PathBuf>, ExportError> {
        let ShellState::Computed(run) = &self.state else {
            self.notice = Some(Notice::info("Generate an agreement first."));
            return Ok(None);
        };

        match export::write_agreement(out_dir, &run.document) {
            Ok(path) => {
                self.notice = Some(Notice::success(format!(
                    "Downloaded {} ({}, {} bytes) to {}",
                    AgreementDocument::FILE_NAME,
                    AgreementDocument::MIME_TYPE,
                    run.document.byte_len(),
                    path.display()
                )));
                self.state = ShellState::Idle;
                Ok(Some(path))
            }
            Err(err) => {
                self.notice = Some(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }
}
