//! Pricing resolution.
//!
//! Derives the suggested price from the total cost and computes revenue,
//! profit and margin under the trip's pricing mode.

use rust_decimal::Decimal;

use crate::calculation::tax::divide_or_zero;
use crate::models::{AuditStep, PricingMode, TripCalculation};

/// Price recommendation and profitability of a trip.
#[derive(Debug, Clone)]
pub struct PricingResult {
    /// Total cost inflated by the target margin.
    pub suggested_price: Decimal,
    /// Suggested price per kilometre, zero for a zero distance.
    pub suggested_price_per_km: Decimal,
    /// Revenue under the pricing mode.
    pub revenue: Decimal,
    /// Revenue minus total cost.
    pub profit: Decimal,
    /// Profit as a percentage of revenue, zero without revenue.
    pub profit_margin: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// `total_cost x (1 + target_margin / 100)`.
///
/// # Examples
///
/// ```
/// use haulage_pricing::calculation::suggested_price;
/// use rust_decimal::Decimal;
///
/// let price = suggested_price(Decimal::from(1000), Decimal::from(15));
/// assert_eq!(price, Decimal::from(1150));
/// ```
pub fn suggested_price(total_cost: Decimal, target_margin: Decimal) -> Decimal {
    total_cost.saturating_mul(Decimal::ONE + target_margin / Decimal::ONE_HUNDRED)
}

/// Revenue of a trip under its pricing mode.
///
/// `Auto` charges the suggested price. Absent optional inputs count as zero.
/// Products too large for a `Decimal` saturate instead of overflowing.
pub fn revenue_for_mode(trip: &TripCalculation, suggested: Decimal) -> Decimal {
    match trip.pricing_mode {
        PricingMode::Km => trip.price_per_km.saturating_mul(trip.distance),
        PricingMode::Fixed => trip.fixed_price,
        PricingMode::Hourly => trip
            .hourly_rate
            .unwrap_or_default()
            .saturating_mul(trip.estimated_hours.unwrap_or_default()),
        PricingMode::KmStops => {
            let stops = Decimal::from(trip.number_of_stops.unwrap_or_default());
            trip.price_per_km
                .saturating_mul(trip.distance)
                .saturating_add(trip.price_per_stop.unwrap_or_default().saturating_mul(stops))
        }
        PricingMode::Auto => suggested,
    }
}

fn mode_formula(trip: &TripCalculation) -> String {
    match trip.pricing_mode {
        PricingMode::Km => format!(
            "{} / km x {} km",
            trip.price_per_km.normalize(),
            trip.distance.normalize()
        ),
        PricingMode::Fixed => format!("fixed price {}", trip.fixed_price.normalize()),
        PricingMode::Hourly => format!(
            "{} / h x {} h",
            trip.hourly_rate.unwrap_or_default().normalize(),
            trip.estimated_hours.unwrap_or_default().normalize()
        ),
        PricingMode::KmStops => format!(
            "{} / km x {} km + {} x {} stop(s)",
            trip.price_per_km.normalize(),
            trip.distance.normalize(),
            trip.price_per_stop.unwrap_or_default().normalize(),
            trip.number_of_stops.unwrap_or_default()
        ),
        PricingMode::Auto => "suggested price".to_string(),
    }
}

/// Computes the suggested price, revenue, profit and margin of a trip.
///
/// A negative profit is a valid result, not an error.
///
/// # Arguments
///
/// * `total_cost` - Tax-exclusive total cost of the trip
/// * `trip` - Supplies the pricing mode, its inputs, the distance and the target margin
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns a `PricingResult` with the suggested price, revenue, profit and
/// margin, plus an audit step. Per-km figures are zero for a zero distance
/// and the margin is zero without revenue.
pub fn resolve_pricing(
    total_cost: Decimal,
    trip: &TripCalculation,
    step_number: u32,
) -> PricingResult {
    let suggested = suggested_price(total_cost, trip.target_margin);
    let suggested_price_per_km = if trip.distance > Decimal::ZERO {
        divide_or_zero(suggested, trip.distance)
    } else {
        Decimal::ZERO
    };

    let revenue = revenue_for_mode(trip, suggested);
    let profit = revenue.saturating_sub(total_cost);
    let profit_margin = if revenue > Decimal::ZERO {
        divide_or_zero(profit, revenue).saturating_mul(Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "pricing".to_string(),
        rule_name: "Pricing and Profitability".to_string(),
        input: serde_json::json!({
            "total_cost": total_cost.normalize().to_string(),
            "pricing_mode": trip.pricing_mode.as_str(),
            "target_margin": trip.target_margin.normalize().to_string(),
            "distance": trip.distance.normalize().to_string()
        }),
        output: serde_json::json!({
            "suggested_price": suggested.normalize().to_string(),
            "suggested_price_per_km": suggested_price_per_km.normalize().to_string(),
            "revenue": revenue.normalize().to_string(),
            "profit": profit.normalize().to_string(),
            "profit_margin": profit_margin.normalize().to_string()
        }),
        reasoning: format!(
            "Revenue ({}): {} = {}; profit {} ({}%)",
            trip.pricing_mode.as_str(),
            mode_formula(trip),
            revenue.normalize(),
            profit.normalize(),
            profit_margin.round_dp(2).normalize()
        ),
    };

    PricingResult {
        suggested_price: suggested,
        suggested_price_per_km,
        revenue,
        profit,
        profit_margin,
        audit_step,
    }
}
