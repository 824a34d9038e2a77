//! Shared domain types.
//!
//! Everything here is ephemeral: a `ShipmentRequest` lives for a single
//! submission and its `AgreementDocument` is handed to the caller and never
//! stored.

use serde::Serialize;

/// Lowest value the mileage and rate inputs accept.
pub const INPUT_FLOOR: f64 = 0.01;

/// Why a submission was rejected before any calculation ran.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Driver name is required.")]
    MissingDriverName,

    #[error("Mileage must be greater than zero (got {0}).")]
    NonPositiveMileage(f64),
}

/// One validated shipment submission.
///
/// Only `ShipmentRequest::new` builds one, so a value of this type always
/// has a non-empty driver name and a positive mileage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipmentRequest {
    driver_name: String,
    plate: String,
    mileage: f64,
    rate: f64,
}

impl ShipmentRequest {
    /// Validate raw form values.
    ///
    /// The plate may be empty and the rate is taken as-is; the input widgets
    /// already enforce the rate floor.
    pub fn new(
        driver_name: impl Into<String>,
        plate: impl Into<String>,
        mileage: f64,
        rate: f64,
    ) -> Result<Self, ValidationError> {
        let driver_name = driver_name.into();
        if driver_name.is_empty() {
            return Err(ValidationError::MissingDriverName);
        }
        // `!(x > 0)` also rejects NaN.
        if !(mileage > 0.0) {
            return Err(ValidationError::NonPositiveMileage(mileage));
        }
        Ok(Self {
            driver_name,
            plate: plate.into(),
            mileage,
            rate,
        })
    }

    pub fn driver_name(&self) -> &str {
        &self.driver_name
    }

    pub fn plate(&self) -> &str {
        &self.plate
    }

    pub fn mileage(&self) -> f64 {
        self.mileage
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

/// Which surcharge rate applied to a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SurchargeTier {
    /// Mileage at or below the threshold.
    Low,
    /// Mileage strictly above the threshold.
    High,
}

impl SurchargeTier {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

/// Intermediate values of the cost formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    /// `mileage * rate`
    pub base: f64,
    pub tier: SurchargeTier,
    pub surcharge_rate: f64,
    /// `base * surcharge_rate`
    pub surcharge: f64,
    /// `base + surcharge`
    pub total: f64,
}

/// A rendered one-page agreement (PDF bytes).
#[derive(Clone, PartialEq, Eq)]
pub struct AgreementDocument {
    bytes: Vec<u8>,
}

impl AgreementDocument {
    /// Name the artifact is offered under.
    pub const FILE_NAME: &'static str = "service_agreement.pdf";
    pub const MIME_TYPE: &'static str = "application/pdf";

    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

impl std::fmt::Debug for AgreementDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgreementDocument")
            .field("file_name", &Self::FILE_NAME)
            .field("len", &self.bytes.len())
            .finish()
    }
}
