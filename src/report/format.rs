//! Value formatting and the plain-text quote summary.
//!
//! The agreement, the TUI and the `quote` command all format numbers through
//! these helpers so the same value always reads the same way.

use crate::config::Settings;
use crate::domain::{CostBreakdown, ShipmentRequest};

/// Currency amount with two decimals, e.g. `$105.00`.
pub fn fmt_money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Mileage as entered: shortest round-trip decimal, whole numbers keep one
/// decimal place (`50.0`, `12.75`).
pub fn fmt_mileage(mileage: f64) -> String {
    if mileage.is_finite() && mileage.fract() == 0.0 {
        format!("{mileage:.1}")
    } else {
        format!("{mileage}")
    }
}

/// Rate as a percentage, e.g. `0.05` → `5%`.
pub fn fmt_percent(rate: f64) -> String {
    let pct = rate * 100.0;
    if (pct - pct.round()).abs() < 1e-9 {
        format!("{:.0}%", pct.round())
    } else {
        format!("{pct:.2}%")
    }
}

/// Success message shown once a quote has been computed.
pub fn success_message(total: f64) -> String {
    format!("Calculated Successfully! Total Cost: {}", fmt_money(total))
}

/// Multi-line summary of a computed quote (used by `agreement quote`).
pub fn format_quote_summary(
    request: &ShipmentRequest,
    cost: &CostBreakdown,
    settings: &Settings,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Service Agreement - {} ===\n", settings.company_name));
    out.push_str(&format!("Driver: {}\n", request.driver_name()));
    out.push_str(&format!("License Plate: {}\n", request.plate()));
    out.push_str(&format!(
        "Mileage: {} @ {}/mile\n",
        fmt_mileage(request.mileage()),
        fmt_money(request.rate())
    ));
    out.push('\n');
    out.push_str(&format_breakdown(cost, settings));
    out.push('\n');
    out.push_str(&success_message(cost.total));
    out.push('\n');

    out
}

/// Cost breakdown table lines.
pub fn format_breakdown(cost: &CostBreakdown, settings: &Settings) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<18} {:>12}\n", "Base cost:", fmt_money(cost.base)));
    out.push_str(&format!(
        "{:<18} {:>12}\n",
        format!("Surcharge ({}):", fmt_percent(cost.surcharge_rate)),
        fmt_money(cost.surcharge)
    ));
    out.push_str(&format!(
        "{:<18} {:>12}\n",
        "Tier:",
        format!(
            "{} (threshold {})",
            cost.tier.display_name(),
            fmt_mileage(settings.surcharge_threshold)
        )
    ));
    out.push_str(&format!("{:<18} {:>12}\n", "Total:", fmt_money(cost.total)));
    out
}
