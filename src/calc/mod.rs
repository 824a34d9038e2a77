//! Shipping cost formula.
//!
//! `total = base + base * surcharge_rate` where `base = mileage * rate` and
//! the surcharge rate is `high_surcharge_rate` when mileage is strictly above
//! `surcharge_threshold`, `low_surcharge_rate` otherwise.
//!
//! These functions do not validate their inputs. Zero or negative values
//! produce a meaningless result; callers go through `ShipmentRequest::new`.

use crate::config::Settings;
use crate::domain::{CostBreakdown, SurchargeTier};

/// Total agreed cost for a shipment.
pub fn calculate_total(mileage: f64, rate: f64, settings: &Settings) -> f64 {
    breakdown(mileage, rate, settings).total
}

/// Tier for a given mileage. Mileage equal to the threshold is `Low`.
pub fn surcharge_tier(mileage: f64, settings: &Settings) -> SurchargeTier {
    if mileage > settings.surcharge_threshold {
        SurchargeTier::High
    } else {
        SurchargeTier::Low
    }
}

/// Full cost breakdown (base, tier, surcharge, total).
pub fn breakdown(mileage: f64, rate: f64, settings: &Settings) -> CostBreakdown {
    let base = mileage * rate;
    let tier = surcharge_tier(mileage, settings);
    let surcharge_rate = match tier {
        SurchargeTier::High => settings.high_surcharge_rate,
        SurchargeTier::Low => settings.low_surcharge_rate,
    };
    let surcharge = base * surcharge_rate;

    CostBreakdown {
        base,
        tier,
        surcharge_rate,
        surcharge,
        total: base + surcharge,
    }
}
