//! Quote service: the full trip costing and pricing pipeline.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculation::pricing::resolve_pricing;
use crate::calculation::trip_cost::{TripCostInput, calculate_trip_costs};
use crate::models::{
    AppSettings, AuditTrace, CostBreakdown, Driver, FixedCharge, FleetUnit, TripCalculation,
    TripQuote, VehicleParams,
};

/// Everything needed to quote one trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteInput {
    /// The trip.
    pub trip: TripCalculation,
    /// Unit prices and default consumption.
    #[serde(default)]
    pub vehicle_params: VehicleParams,
    /// Selected vehicles.
    #[serde(default)]
    pub vehicles: Vec<FleetUnit>,
    /// Selected trailer.
    #[serde(default)]
    pub trailer: Option<FleetUnit>,
    /// Assigned drivers.
    #[serde(default)]
    pub drivers: Vec<Driver>,
    /// Recurring fixed charges.
    #[serde(default)]
    pub charges: Vec<FixedCharge>,
}

impl QuoteInput {
    fn cost_input(&self) -> TripCostInput<'_> {
        TripCostInput {
            trip: &self.trip,
            vehicle_params: &self.vehicle_params,
            vehicles: &self.vehicles,
            trailer: self.trailer.as_ref(),
            drivers: &self.drivers,
            charges: &self.charges,
        }
    }
}

/// Costs and prices a trip.
///
/// Runs the trip cost aggregator then the pricing resolver. The result is a
/// pure function of `input` and `settings`.
///
/// # Arguments
///
/// * `input` - The trip and everything assigned to it
/// * `settings` - VAT rate and working days
///
/// # Returns
///
/// Returns a `TripQuote` holding the cost breakdown and an audit trace of six
/// steps. Never fails: degenerate inputs degrade to zero and oversized ones
/// saturate.
pub fn calculate_quote(input: &QuoteInput, settings: &AppSettings) -> TripQuote {
    let costs = calculate_trip_costs(&input.cost_input(), settings, 1);
    for step in &costs.audit_steps {
        debug!(
            step = step.step_number,
            rule_id = %step.rule_id,
            output = %step.output,
            "cost stage"
        );
    }

    let next_step = costs.audit_steps.len() as u32 + 1;
    let pricing = resolve_pricing(costs.costs.total_cost, &input.trip, next_step);
    debug!(
        mode = input.trip.pricing_mode.as_str(),
        revenue = %pricing.revenue,
        profit = %pricing.profit,
        "pricing stage"
    );

    let c = costs.costs;
    let breakdown = CostBreakdown {
        fuel: c.fuel,
        ad_blue: c.ad_blue,
        tolls: c.tolls,
        driver_cost: c.driver_cost,
        driver_bonuses: c.driver_bonuses,
        driver_allowances: c.driver_allowances,
        structure_cost: c.structure_cost,
        vehicle_cost: c.vehicle_cost,
        trailer_cost: c.trailer_cost,
        total_cost: c.total_cost,
        cost_per_km: c.cost_per_km,
        suggested_price: pricing.suggested_price,
        suggested_price_per_km: pricing.suggested_price_per_km,
        revenue: pricing.revenue,
        profit: pricing.profit,
        profit_margin: pricing.profit_margin,
    };

    let mut steps = costs.audit_steps;
    steps.push(pricing.audit_step);

    TripQuote {
        breakdown,
        audit_trace: AuditTrace {
            steps,
            warnings: costs.warnings,
        },
    }
}
