//! Trip cost aggregation.
//!
//! Combines variable costs (fuel, AdBlue, tolls), driver costs, structure
//! costs and fleet ownership costs into the tax-exclusive total of one trip.

use rust_decimal::Decimal;

use crate::calculation::driver_cost::resolve_driver_costs;
use crate::calculation::fleet_amortization::{amortize_fleet, effective_consumption};
use crate::calculation::structure_cost::amortize_charges;
use crate::calculation::tax::{divide_or_zero, saturating_sum, to_ht};
use crate::models::{
    AppSettings, AuditStep, AuditWarning, Driver, FixedCharge, FleetUnit, TripCalculation,
    VehicleParams,
};

/// Everything the aggregator needs to cost a trip.
#[derive(Debug, Clone, Copy)]
pub struct TripCostInput<'a> {
    /// The trip being priced.
    pub trip: &'a TripCalculation,
    /// Unit prices, and consumption used when no vehicle is selected.
    pub vehicle_params: &'a VehicleParams,
    /// Selected vehicles.
    pub vehicles: &'a [FleetUnit],
    /// Selected trailer, if any.
    pub trailer: Option<&'a FleetUnit>,
    /// Drivers assigned to the trip.
    pub drivers: &'a [Driver],
    /// Recurring fixed charges of the business.
    pub charges: &'a [FixedCharge],
}

/// Tax-exclusive cost components of a trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripCosts {
    /// Fuel cost.
    pub fuel: Decimal,
    /// AdBlue cost.
    pub ad_blue: Decimal,
    /// Tolls.
    pub tolls: Decimal,
    /// Base driver cost.
    pub driver_cost: Decimal,
    /// Prorated driver bonuses.
    pub driver_bonuses: Decimal,
    /// Driver allowances.
    pub driver_allowances: Decimal,
    /// Share of fixed charges.
    pub structure_cost: Decimal,
    /// Daily cost of the vehicles.
    pub vehicle_cost: Decimal,
    /// Daily cost of the trailer.
    pub trailer_cost: Decimal,
    /// Sum of every component.
    pub total_cost: Decimal,
    /// Total cost per kilometre, zero for a zero distance.
    pub cost_per_km: Decimal,
}

/// The costs of a trip along with the audit steps that produced them.
#[derive(Debug, Clone)]
pub struct TripCostResult {
    /// The cost components.
    pub costs: TripCosts,
    /// One audit step per stage, in order.
    pub audit_steps: Vec<AuditStep>,
    /// Inputs that were degraded to zero.
    pub warnings: Vec<AuditWarning>,
}

/// Computes every cost component of a trip.
///
/// Stages, in order: variable costs, drivers, structure, fleet, total.
///
/// # Arguments
///
/// * `input` - The trip, unit prices, fleet, drivers and charges to cost
/// * `settings` - VAT rate and working days used by every stage
/// * `first_step` - Number given to the first audit step; the others follow
///
/// # Returns
///
/// Returns a `TripCostResult` with the nine tax-exclusive components, their
/// total, the cost per km, five audit steps and the warnings of every stage.
/// Totals saturate at `Decimal::MAX` rather than overflow.
pub fn calculate_trip_costs(
    input: &TripCostInput<'_>,
    settings: &AppSettings,
    first_step: u32,
) -> TripCostResult {
    let trip = input.trip;
    let params = input.vehicle_params;
    let tva_rate = settings.tva_rate;

    let fuel_price_ht = to_ht(params.fuel_price, tva_rate, params.fuel_price_is_ht);
    let ad_blue_price_ht = to_ht(params.ad_blue_price, tva_rate, params.ad_blue_price_is_ht);
    let consumption = effective_consumption(input.vehicles, params);

    let hundreds_of_km = trip.distance / Decimal::ONE_HUNDRED;
    let fuel = hundreds_of_km
        .saturating_mul(consumption.fuel)
        .saturating_mul(fuel_price_ht);
    let ad_blue = hundreds_of_km
        .saturating_mul(consumption.ad_blue)
        .saturating_mul(ad_blue_price_ht);
    let tolls = to_ht(trip.toll_cost, tva_rate, trip.toll_is_ht);

    let variable_step = AuditStep {
        step_number: first_step,
        rule_id: "variable_costs".to_string(),
        rule_name: "Fuel, AdBlue and Tolls".to_string(),
        input: serde_json::json!({
            "distance": trip.distance.normalize().to_string(),
            "fuel_consumption": consumption.fuel.normalize().to_string(),
            "ad_blue_consumption": consumption.ad_blue.normalize().to_string(),
            "fuel_price_ht": fuel_price_ht.normalize().to_string(),
            "ad_blue_price_ht": ad_blue_price_ht.normalize().to_string(),
            "toll_cost": trip.toll_cost.normalize().to_string(),
            "toll_is_ht": trip.toll_is_ht
        }),
        output: serde_json::json!({
            "fuel": fuel.normalize().to_string(),
            "ad_blue": ad_blue.normalize().to_string(),
            "tolls": tolls.normalize().to_string()
        }),
        reasoning: format!(
            "{} km / 100 x {} L x {} = {} fuel; tolls {} HT",
            trip.distance.normalize(),
            consumption.fuel.normalize(),
            fuel_price_ht.normalize(),
            fuel.normalize(),
            tolls.normalize()
        ),
    };

    let drivers = resolve_driver_costs(input.drivers, first_step + 1);
    let structure = amortize_charges(input.charges, settings, first_step + 2);
    let fleet = amortize_fleet(input.vehicles, input.trailer, settings, first_step + 3);

    let total_cost = saturating_sum([
        fuel,
        ad_blue,
        tolls,
        drivers.driver_cost,
        drivers.driver_bonuses,
        drivers.driver_allowances,
        structure.structure_cost,
        fleet.vehicle_cost,
        fleet.trailer_cost,
    ]);
    let cost_per_km = if trip.distance > Decimal::ZERO {
        divide_or_zero(total_cost, trip.distance)
    } else {
        Decimal::ZERO
    };

    let total_step = AuditStep {
        step_number: first_step + 4,
        rule_id: "total_cost".to_string(),
        rule_name: "Total Cost".to_string(),
        input: serde_json::json!({
            "distance": trip.distance.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_cost": total_cost.normalize().to_string(),
            "cost_per_km": cost_per_km.normalize().to_string()
        }),
        reasoning: if trip.distance > Decimal::ZERO {
            format!(
                "Total {} over {} km = {} per km",
                total_cost.normalize(),
                trip.distance.normalize(),
                cost_per_km.normalize()
            )
        } else {
            format!(
                "Total {}; no distance, cost per km is zero",
                total_cost.normalize()
            )
        },
    };

    let mut warnings = drivers.warnings;
    warnings.extend(structure.warnings);

    TripCostResult {
        costs: TripCosts {
            fuel,
            ad_blue,
            tolls,
            driver_cost: drivers.driver_cost,
            driver_bonuses: drivers.driver_bonuses,
            driver_allowances: drivers.driver_allowances,
            structure_cost: structure.structure_cost,
            vehicle_cost: fleet.vehicle_cost,
            trailer_cost: fleet.trailer_cost,
            total_cost,
            cost_per_km,
        },
        audit_steps: vec![
            variable_step,
            drivers.audit_step,
            structure.audit_step,
            fleet.audit_step,
            total_step,
        ],
        warnings,
    }
}
