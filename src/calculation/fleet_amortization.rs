//! Spreads fleet ownership costs over one working day.
//!
//! Daily fixed costs of several vehicles add up. Consumption rates do not:
//! a convoy burns one average rate over the trip distance, so rates are
//! averaged across the selected vehicles.

use rust_decimal::Decimal;

use crate::calculation::tax::{divide_or_zero, saturating_sum};
use crate::models::{AppSettings, AuditStep, FleetUnit, VehicleParams};

/// Where the effective consumption figures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumptionSource {
    /// Averaged across the selected vehicles.
    SelectedVehicles,
    /// Taken from the default vehicle parameters.
    DefaultParams,
}

/// Fuel and AdBlue consumption applied to the trip distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConsumption {
    /// Fuel in litres per 100 km.
    pub fuel: Decimal,
    /// AdBlue in litres per 100 km.
    pub ad_blue: Decimal,
    /// Where the figures came from.
    pub source: ConsumptionSource,
}

/// Daily fixed costs of the selected vehicles and trailer.
#[derive(Debug, Clone)]
pub struct FleetAmortizationResult {
    /// Sum of the daily shares of every selected vehicle.
    pub vehicle_cost: Decimal,
    /// Daily share of the selected trailer.
    pub trailer_cost: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Daily share of an annual fixed cost: `annual / working_days_per_year`.
///
/// Zero when the settings have no working days.
pub fn daily_fixed_cost(total_annual_fixed_cost: Decimal, settings: &AppSettings) -> Decimal {
    divide_or_zero(total_annual_fixed_cost, settings.working_days_per_year)
}

/// Resolves the consumption rates to apply to the trip.
///
/// # Examples
///
/// ```
/// use haulage_pricing::calculation::effective_consumption;
/// use haulage_pricing::models::{FleetUnit, VehicleParams};
/// use rust_decimal::Decimal;
///
/// let unit = |id: &str, fuel: i64| FleetUnit {
///     id: id.to_string(),
///     fuel_consumption: Decimal::from(fuel),
///     ad_blue_consumption: Decimal::ZERO,
///     total_annual_fixed_cost: Decimal::ZERO,
/// };
///
/// let consumption = effective_consumption(
///     &[unit("a", 30), unit("b", 34)],
///     &VehicleParams::default(),
/// );
/// assert_eq!(consumption.fuel, Decimal::from(32));
/// ```
pub fn effective_consumption(vehicles: &[FleetUnit], defaults: &VehicleParams) -> EffectiveConsumption {
    if vehicles.is_empty() {
        return EffectiveConsumption {
            fuel: defaults.fuel_consumption,
            ad_blue: defaults.ad_blue_consumption,
            source: ConsumptionSource::DefaultParams,
        };
    }

    let count = Decimal::from(vehicles.len());
    let fuel = saturating_sum(vehicles.iter().map(|v| v.fuel_consumption));
    let ad_blue = saturating_sum(vehicles.iter().map(|v| v.ad_blue_consumption));

    EffectiveConsumption {
        fuel: fuel / count,
        ad_blue: ad_blue / count,
        source: ConsumptionSource::SelectedVehicles,
    }
}

/// Amortizes the selected vehicles and optional trailer over one working day.
///
/// # Arguments
///
/// * `vehicles` - Selected vehicles; each one's daily cost is added
/// * `trailer` - The trailer, counted at most once
/// * `settings` - Supplies the working days per year
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns a `FleetAmortizationResult` with the daily vehicle and trailer costs
/// and an audit step. Both costs are zero when the year has no working days.
pub fn amortize_fleet(
    vehicles: &[FleetUnit],
    trailer: Option<&FleetUnit>,
    settings: &AppSettings,
    step_number: u32,
) -> FleetAmortizationResult {
    let vehicle_cost = saturating_sum(
        vehicles
            .iter()
            .map(|v| daily_fixed_cost(v.total_annual_fixed_cost, settings)),
    );
    let trailer_cost = trailer.map_or(Decimal::ZERO, |t| {
        daily_fixed_cost(t.total_annual_fixed_cost, settings)
    });

    let reasoning = if vehicles.is_empty() && trailer.is_none() {
        "No vehicle or trailer selected - fleet cost is zero".to_string()
    } else {
        format!(
            "{} vehicle(s): {} / day; trailer: {} / day (annual cost / {} working days)",
            vehicles.len(),
            vehicle_cost.normalize(),
            trailer_cost.normalize(),
            settings.working_days_per_year.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "fleet_amortization".to_string(),
        rule_name: "Fleet Fixed-Cost Amortization".to_string(),
        input: serde_json::json!({
            "vehicles": vehicles
                .iter()
                .map(|v| serde_json::json!({
                    "id": v.id,
                    "total_annual_fixed_cost": v.total_annual_fixed_cost.normalize().to_string()
                }))
                .collect::<Vec<_>>(),
            "trailer": trailer.map(|t| serde_json::json!({
                "id": t.id,
                "total_annual_fixed_cost": t.total_annual_fixed_cost.normalize().to_string()
            })),
            "working_days_per_year": settings.working_days_per_year.normalize().to_string()
        }),
        output: serde_json::json!({
            "vehicle_cost": vehicle_cost.normalize().to_string(),
            "trailer_cost": trailer_cost.normalize().to_string()
        }),
        reasoning,
    };

    FleetAmortizationResult {
        vehicle_cost,
        trailer_cost,
        audit_step,
    }
}
