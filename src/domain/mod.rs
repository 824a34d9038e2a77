//! Domain types shared by the calculator, the renderer and the front-ends.
//!
//! This module defines:
//!
//! - the per-submission request (`ShipmentRequest`) and its validation errors
//! - calculation outputs (`CostBreakdown`, `SurchargeTier`)
//! - the rendered artifact (`AgreementDocument`)

pub mod types;

pub use types::*;
