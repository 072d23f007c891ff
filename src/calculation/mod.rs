//! Calculation logic for the haulage pricing engine.
//!
//! Every function here is pure: inputs and settings are passed explicitly,
//! nothing is retained between calls, and degenerate inputs (zero distance,
//! zero working days, missing optional values) degrade to zero instead of
//! failing. The stages are tax normalization, driver costs, fleet ownership
//! costs, structure costs, trip cost aggregation, pricing and margin alerts.

mod driver_cost;
mod fleet_amortization;
mod fleet_cost;
mod margin_alert;
mod pricing;
mod quote;
mod structure_cost;
mod tax;
mod trip_cost;

pub use driver_cost::{DriverCostLine, DriverCostResult, driver_daily_cost, resolve_driver_costs};
pub use fleet_amortization::{
    ConsumptionSource, EffectiveConsumption, FleetAmortizationResult, amortize_fleet,
    daily_fixed_cost, effective_consumption,
};
pub use fleet_cost::{
    CostPerKmRating, DepreciationResult, MAX_DEPRECIATION_YEARS, TrailerCostBreakdown,
    VehicleCostBreakdown, VehicleCostParams, calculate_trailer_costs,
    calculate_trailer_depreciation, calculate_vehicle_costs, calculate_vehicle_depreciation,
    default_estimated_annual_km, fleet_unit_for_trailer, fleet_unit_for_vehicle, rate_cost_per_km,
};
pub use margin_alert::{
    MarginCheck, alert_severity, check_margin, evaluate_margin, round_half_up,
};
pub use pricing::{PricingResult, resolve_pricing, revenue_for_mode, suggested_price};
pub use quote::{QuoteInput, calculate_quote};
pub use structure_cost::{StructureCostResult, amortize_charges, daily_charge_amount};
pub use tax::{divide_or_zero, saturating_sum, to_ht, to_ttc, vat_multiplier};
pub use trip_cost::{TripCostInput, TripCostResult, TripCosts, calculate_trip_costs};
