//! Submission pipeline shared by the TUI and the `quote` command.
//!
//! validate -> calculate -> render
//!
//! Front-ends only deal with presentation (widgets vs printing).

use serde::Serialize;

use crate::agreement::{EncodingError, RenderError, render_agreement};
use crate::config::Settings;
use crate::domain::{AgreementDocument, CostBreakdown, ShipmentRequest};

pub use crate::domain::ValidationError;

/// Anything that rejects a single submission. Never fatal to the process.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Please enter all required details. {0}")]
    Validation(#[from] ValidationError),

    #[error("Could not render the agreement: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Could not render the agreement: {0}")]
    Render(String),
}

impl From<RenderError> for SubmissionError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Encoding(err) => Self::Encoding(err),
            RenderError::Pdf(err) => Self::Render(err.to_string()),
        }
    }
}

/// Outputs of one successful submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub request: ShipmentRequest,
    pub cost: CostBreakdown,
    pub document: AgreementDocument,
}

/// Serializable record of a submission (for `quote --json`).
#[derive(Debug, Clone, Serialize)]
pub struct QuoteRecord<'a> {
    pub company_name: &'a str,
    pub request: &'a ShipmentRequest,
    pub cost: &'a CostBreakdown,
    pub artifact: &'static str,
    pub mime_type: &'static str,
}

impl Submission {
    pub fn total(&self) -> f64 {
        self.cost.total
    }

    pub fn record<'a>(&'a self, settings: &'a Settings) -> QuoteRecord<'a> {
        QuoteRecord {
            company_name: &settings.company_name,
            request: &self.request,
            cost: &self.cost,
            artifact: AgreementDocument::FILE_NAME,
            mime_type: AgreementDocument::MIME_TYPE,
        }
    }
}

/// Validate raw form values and run the pipeline.
pub fn submit(
    driver_name: &str,
    plate: &str,
    mileage: f64,
    rate: f64,
    settings: &Settings,
) -> Result<Submission, SubmissionError> {
    let request = ShipmentRequest::new(driver_name, plate, mileage, rate).inspect_err(|err| {
        tracing::warn!(%err, "submission rejected");
    })?;
    run_submission(request, settings)
}

/// Calculate and render for an already validated request.
pub fn run_submission(
    request: ShipmentRequest,
    settings: &Settings,
) -> Result<Submission, SubmissionError> {
    let cost = crate::calc::breakdown(request.mileage(), request.rate(), settings);
    tracing::debug!(
        mileage = request.mileage(),
        rate = request.rate(),
        tier = cost.tier.display_name(),
        total = cost.total,
        "calculated shipment cost"
    );

    let document = render_agreement(
        request.driver_name(),
        request.plate(),
        request.mileage(),
        cost.total,
        settings,
    )
    .inspect_err(|err| tracing::warn!(%err, "agreement rendering failed"))?;

    Ok(Submission {
        request,
        cost,
        document,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            company_name: "Acme Freight".to_string(),
            base_rate: 2.0,
            surcharge_threshold: 100.0,
            high_surcharge_rate: 0.10,
            low_surcharge_rate: 0.05,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    #[test]
    fn scenario_a_low_surcharge() {
        let run = submit("Dana", "TRK-042", 50.0, 2.0, &settings()).unwrap();
        assert_close(run.cost.base, 100.0);
        assert_close(run.cost.surcharge, 5.0);
        assert_close(run.total(), 105.0);
    }

    #[test]
    fn scenario_b_high_surcharge() {
        let run = submit("Dana", "TRK-042", 150.0, 2.0, &settings()).unwrap();
        assert_close(run.cost.base, 300.0);
        assert_close(run.cost.surcharge, 30.0);
        assert_close(run.total(), 330.0);
    }

    #[test]
    fn scenario_c_threshold_uses_low_rate() {
        let run = submit("Dana", "TRK-042", 100.0, 1.0, &settings()).unwrap();
        assert_close(run.cost.surcharge, 5.0);
        assert_close(run.total(), 105.0);
    }

    #[test]
    fn empty_driver_yields_validation_error() {
        let err = submit("", "TRK-042", 50.0, 2.0, &settings()).unwrap_err();
        assert_eq!(err, SubmissionError::Validation(ValidationError::MissingDriverName));
        assert_eq!(
            err.to_string(),
            format!("Please enter all required details. {}", ValidationError::MissingDriverName)
        );
    }

    #[test]
    fn zero_mileage_yields_validation_error() {
        let err = submit("Dana", "", 0.0, 2.0, &settings()).unwrap_err();
        assert!(matches!(err, SubmissionError::Validation(ValidationError::NonPositiveMileage(_))));
    }

    #[test]
    fn encoding_failure_is_surfaced() {
        let err = submit("Dana", "🚚", 50.0, 2.0, &settings()).unwrap_err();
        assert!(matches!(err, SubmissionError::Encoding(_)));
    }

    #[test]
    fn record_serializes_cost_and_artifact() {
        let s = settings();
        let run = submit("Dana", "TRK-042", 50.0, 2.0, &s).unwrap();
        let json = serde_json::to_value(run.record(&s)).unwrap();
        assert_eq!(json["artifact"], "service_agreement.pdf");
        assert_eq!(json["mime_type"], "application/pdf");
        assert_eq!(json["cost"]["tier"], "low");
        assert_eq!(json["request"]["driver_name"], "Dana");
    }
}
