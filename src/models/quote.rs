//! Quote result models.
//!
//! This module contains the [`CostBreakdown`] produced for every trip and the
//! audit structures that explain how each figure was obtained.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Full cost breakdown and price recommendation for a trip.
///
/// Every amount is tax-exclusive and recomputed from scratch on each call.
///
/// # Example
///
/// ```
/// use haulage_pricing::models::CostBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = CostBreakdown::default();
/// assert_eq!(breakdown.total_cost, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Fuel cost.
    pub fuel: Decimal,
    /// AdBlue cost.
    pub ad_blue: Decimal,
    /// Tolls, tax-exclusive.
    pub tolls: Decimal,
    /// Daily employer cost of the drivers.
    pub driver_cost: Decimal,
    /// Prorated night, Sunday and seniority bonuses.
    pub driver_bonuses: Decimal,
    /// Meal and overnight allowances.
    pub driver_allowances: Decimal,
    /// Share of recurring fixed charges for the trip day.
    pub structure_cost: Decimal,
    /// Daily ownership cost of the selected vehicles.
    pub vehicle_cost: Decimal,
    /// Daily ownership cost of the selected trailer.
    pub trailer_cost: Decimal,
    /// Sum of all cost components.
    pub total_cost: Decimal,
    /// Total cost divided by distance, zero for a zero distance.
    pub cost_per_km: Decimal,
    /// Total cost inflated by the target margin.
    pub suggested_price: Decimal,
    /// Suggested price divided by distance, zero for a zero distance.
    pub suggested_price_per_km: Decimal,
    /// Revenue under the selected pricing mode.
    pub revenue: Decimal,
    /// Revenue minus total cost; negative for a loss-making quote.
    pub profit: Decimal,
    /// Profit as a percentage of revenue, zero when there is no revenue.
    pub profit_margin: Decimal,
}

/// A single step in the audit trace recording a calculation stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the stage.
    pub rule_id: String,
    /// The human-readable name of the stage.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the result.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs that were degraded to zero rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// A priced trip: the cost breakdown plus its audit trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripQuote {
    /// The figures.
    pub breakdown: CostBreakdown,
    /// How the figures were obtained.
    pub audit_trace: AuditTrace,
}
