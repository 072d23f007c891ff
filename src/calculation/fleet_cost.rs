//! Fleet ownership cost model.
//!
//! Derives the annual fixed cost of a vehicle or trailer (leasing, insurance,
//! claims provision, depreciation, maintenance, tires) together with its
//! per-kilometre equivalents. The trip cost aggregator only consumes the
//! resulting `total_annual_fixed_cost`, via [`FleetUnit`].

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::calculation::tax::{divide_or_zero, saturating_sum};
use crate::models::{
    DepreciationMethod, DepreciationTerms, FleetUnit, Maintenance, TireSet, Trailer, Vehicle,
};

/// Kilometres driven per year by a typical semi-trailer combination.
pub fn default_estimated_annual_km() -> Decimal {
    Decimal::new(120_000, 0)
}

const VEHICLE_DEPRECIATION_YEARS: u32 = 5;
const VEHICLE_LIFETIME_KM: i64 = 600_000;
const TRAILER_DEPRECIATION_YEARS: u32 = 7;
const TRAILER_LIFETIME_KM: i64 = 800_000;

/// Longest depreciation schedule honoured; longer ones are shortened to it.
pub const MAX_DEPRECIATION_YEARS: u32 = 100;

/// Parameters shared by the vehicle and trailer cost calculations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleCostParams {
    /// Tax-exclusive fuel price per litre.
    pub fuel_price_ht: Decimal,
    /// Tax-exclusive AdBlue price per litre.
    pub ad_blue_price_ht: Decimal,
    /// Kilometres per year; absent or zero means 120,000.
    #[serde(default)]
    pub estimated_annual_km: Option<Decimal>,
    /// Year against which the asset's age is measured.
    pub reference_year: i32,
}

impl VehicleCostParams {
    fn annual_km(&self) -> Decimal {
        self.estimated_annual_km
            .filter(|km| !km.is_zero())
            .unwrap_or_else(default_estimated_annual_km)
    }
}

/// Depreciation position of an asset in the reference year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationResult {
    /// Depreciation charged for the reference year.
    pub annual_depreciation: Decimal,
    /// Annual depreciation divided by twelve.
    pub monthly_depreciation: Decimal,
    /// Depreciable amount over the expected lifetime in kilometres.
    pub depreciation_per_km: Decimal,
    /// Purchase price minus accumulated depreciation, never below residual value.
    pub current_book_value: Decimal,
    /// Accumulated depreciation to date.
    pub total_depreciated: Decimal,
    /// Years left before the asset is fully depreciated.
    pub remaining_years: u32,
    /// Whether the depreciable amount has been fully written off.
    pub is_fully_depreciated: bool,
    /// Share of the depreciable amount written off, capped at 100.
    pub depreciation_percent: Decimal,
}

/// Annual and per-kilometre costs of a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleCostBreakdown {
    /// Maintenance cost over the estimated annual distance.
    pub annual_maintenance_cost: Decimal,
    /// Tire wear over the estimated annual distance.
    pub annual_tire_cost: Decimal,
    /// Insurance premium.
    pub annual_insurance_cost: Decimal,
    /// Claims provision.
    pub annual_sinister_charge: Decimal,
    /// Twelve leasing instalments.
    pub annual_leasing_cost: Decimal,
    /// Depreciation for the reference year.
    pub annual_depreciation: Decimal,
    /// Sum of every annual component.
    pub total_annual_fixed_cost: Decimal,
    /// Maintenance cost per kilometre.
    pub maintenance_cost_per_km: Decimal,
    /// Tire cost per kilometre.
    pub tire_cost_per_km: Decimal,
    /// Fuel cost per kilometre.
    pub fuel_cost_per_km: Decimal,
    /// AdBlue cost per kilometre.
    pub ad_blue_cost_per_km: Decimal,
    /// Insurance, claims and leasing per kilometre.
    pub fixed_cost_per_km: Decimal,
    /// Depreciation per kilometre.
    pub depreciation_cost_per_km: Decimal,
    /// Sum of the per-kilometre components.
    pub total_cost_per_km: Decimal,
    /// Depreciation detail, absent when the vehicle is not depreciated.
    pub depreciation: Option<DepreciationResult>,
    /// The annual distance used for the estimates.
    pub estimated_annual_km: Decimal,
    /// Odometer reading at which the next maintenance is due.
    pub next_maintenance_km: Option<Decimal>,
    /// Odometer reading at which the next tire change is due.
    pub next_tire_change_km: Option<Decimal>,
}

/// Annual and per-kilometre costs of a trailer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailerCostBreakdown {
    /// Maintenance cost over the estimated annual distance.
    pub annual_maintenance_cost: Decimal,
    /// Tire wear over the estimated annual distance.
    pub annual_tire_cost: Decimal,
    /// Insurance premium.
    pub annual_insurance_cost: Decimal,
    /// Twelve leasing instalments.
    pub annual_leasing_cost: Decimal,
    /// Depreciation for the reference year.
    pub annual_depreciation: Decimal,
    /// Sum of every annual component.
    pub total_annual_fixed_cost: Decimal,
    /// Maintenance cost per kilometre.
    pub maintenance_cost_per_km: Decimal,
    /// Tire cost per kilometre.
    pub tire_cost_per_km: Decimal,
    /// Insurance and leasing per kilometre.
    pub fixed_cost_per_km: Decimal,
    /// Depreciation per kilometre.
    pub depreciation_cost_per_km: Decimal,
    /// Sum of the per-kilometre components.
    pub total_cost_per_km: Decimal,
    /// Depreciation detail, absent when the trailer is not depreciated.
    pub depreciation: Option<DepreciationResult>,
    /// The annual distance used for the estimates.
    pub estimated_annual_km: Decimal,
}

/// How expensive a cost per kilometre is for a heavy goods vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostPerKmRating {
    /// Below 0.80 per km.
    Good,
    /// Between 0.80 and 1.00 per km.
    Watch,
    /// 1.00 per km or more.
    High,
}

/// Rates a per-kilometre cost against the usual haulage bands.
pub fn rate_cost_per_km(cost_per_km: Decimal) -> CostPerKmRating {
    if cost_per_km < Decimal::new(80, 2) {
        CostPerKmRating::Good
    } else if cost_per_km < Decimal::ONE {
        CostPerKmRating::Watch
    } else {
        CostPerKmRating::High
    }
}

struct DepreciableAsset {
    purchase_price: Decimal,
    residual_value: Decimal,
    years: u32,
    method: DepreciationMethod,
    expected_lifetime_km: Decimal,
    age: u32,
    current_km: Decimal,
}

impl DepreciableAsset {
    fn new(
        terms: &DepreciationTerms,
        purchase_price: Decimal,
        year: i32,
        current_km: Decimal,
        reference_year: i32,
        default_years: u32,
        default_lifetime_km: i64,
    ) -> Self {
        let years = terms
            .years
            .filter(|y| *y > 0)
            .unwrap_or(default_years)
            .min(MAX_DEPRECIATION_YEARS);
        // Past the end of the schedule every method has written off everything.
        let age = u32::try_from(reference_year.saturating_sub(year))
            .unwrap_or(0)
            .min(years);

        Self {
            purchase_price,
            residual_value: terms.residual_value.unwrap_or(Decimal::ZERO),
            years,
            method: terms.method.unwrap_or_default(),
            expected_lifetime_km: terms
                .expected_lifetime_km
                .filter(|km| !km.is_zero())
                .unwrap_or_else(|| Decimal::from(default_lifetime_km)),
            age,
            current_km,
        }
    }
}

fn degressive_coefficient(years: u32) -> Decimal {
    if years >= 5 {
        Decimal::new(225, 2)
    } else if years >= 3 {
        Decimal::new(175, 2)
    } else {
        Decimal::new(125, 2)
    }
}

fn calculate_depreciation(asset: &DepreciableAsset) -> Option<DepreciationResult> {
    if asset.purchase_price <= Decimal::ZERO || asset.years == 0 {
        return None;
    }

    let years = Decimal::from(asset.years);
    let depreciable_amount = asset.purchase_price - asset.residual_value;
    let linear_amount = depreciable_amount / years;

    let (annual_depreciation, total_depreciated) = match asset.method {
        DepreciationMethod::Linear => {
            let accumulated = (linear_amount * Decimal::from(asset.age)).min(depreciable_amount);
            (linear_amount, accumulated)
        }
        DepreciationMethod::Degressive => {
            let rate = Decimal::ONE_HUNDRED / years * degressive_coefficient(asset.years)
                / Decimal::ONE_HUNDRED;

            let mut remaining_value = asset.purchase_price;
            let mut accumulated = Decimal::ZERO;
            for _ in 0..asset.age {
                if remaining_value <= asset.residual_value {
                    break;
                }
                let yearly = (remaining_value * rate).max(linear_amount);
                accumulated += yearly.min(remaining_value - asset.residual_value);
                remaining_value -= yearly;
                if remaining_value < asset.residual_value {
                    remaining_value = asset.residual_value;
                }
            }

            let current = ((asset.purchase_price - accumulated) * rate).max(linear_amount);
            (current, accumulated)
        }
        DepreciationMethod::Km => {
            let per_km = divide_or_zero(depreciable_amount, asset.expected_lifetime_km);
            let accumulated = per_km
                .saturating_mul(asset.current_km)
                .min(depreciable_amount);
            (per_km.saturating_mul(default_estimated_annual_km()), accumulated)
        }
    };

    let is_fully_depreciated = total_depreciated >= depreciable_amount;
    let remaining_years = if is_fully_depreciated {
        0
    } else {
        divide_or_zero(depreciable_amount - total_depreciated, annual_depreciation)
            .ceil()
            .to_u32()
            .unwrap_or(0)
    };
    let depreciation_percent = if depreciable_amount > Decimal::ZERO {
        (total_depreciated / depreciable_amount * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    Some(DepreciationResult {
        annual_depreciation,
        monthly_depreciation: annual_depreciation / Decimal::from(12),
        depreciation_per_km: divide_or_zero(depreciable_amount, asset.expected_lifetime_km),
        current_book_value: (asset.purchase_price - total_depreciated).max(asset.residual_value),
        total_depreciated,
        remaining_years,
        is_fully_depreciated,
        depreciation_percent,
    })
}

/// Computes the depreciation of a vehicle (defaults: linear, 5 years, 600,000 km).
///
/// Returns `None` when the vehicle has no purchase price, e.g. when leased.
pub fn calculate_vehicle_depreciation(
    vehicle: &Vehicle,
    reference_year: i32,
) -> Option<DepreciationResult> {
    calculate_depreciation(&DepreciableAsset::new(
        &vehicle.depreciation,
        vehicle.purchase_price,
        vehicle.year,
        vehicle.current_km,
        reference_year,
        VEHICLE_DEPRECIATION_YEARS,
        VEHICLE_LIFETIME_KM,
    ))
}

/// Computes the depreciation of a trailer (defaults: linear, 7 years, 800,000 km).
pub fn calculate_trailer_depreciation(
    trailer: &Trailer,
    reference_year: i32,
) -> Option<DepreciationResult> {
    calculate_depreciation(&DepreciableAsset::new(
        &trailer.depreciation,
        trailer.purchase_price,
        trailer.year,
        trailer.current_km,
        reference_year,
        TRAILER_DEPRECIATION_YEARS,
        TRAILER_LIFETIME_KM,
    ))
}

fn maintenance_cost_per_km(maintenances: &[Maintenance]) -> Decimal {
    saturating_sum(
        maintenances
            .iter()
            .filter(|m| m.interval_km > Decimal::ZERO)
            .map(|m| divide_or_zero(m.cost, m.interval_km)),
    )
}

fn tire_cost_per_km(tires: &[TireSet]) -> Decimal {
    saturating_sum(
        tires
            .iter()
            .filter(|t| t.durability_km > Decimal::ZERO)
            .map(|t| divide_or_zero(t.set_cost(), t.durability_km)),
    )
}

/// Odometer reading of the soonest upcoming event, ignoring overdue ones.
fn next_due_km(
    current_km: Decimal,
    schedule: impl Iterator<Item = (Decimal, Decimal)>,
) -> Option<Decimal> {
    schedule
        .filter(|(interval, _)| *interval > Decimal::ZERO)
        .map(|(interval, last_km)| interval - (current_km - last_km))
        .filter(|until| *until > Decimal::ZERO)
        .min()
        .map(|until| current_km + until)
}

/// Computes the full cost breakdown of a vehicle.
///
/// # Arguments
///
/// * `vehicle` - The vehicle record, including its maintenance and tire schedules
/// * `params` - Tax-exclusive unit prices, annual mileage and the reference year
///
/// # Returns
///
/// Returns a `VehicleCostBreakdown` with annual costs, their per-km
/// equivalents, the depreciation details when the vehicle was purchased, and
/// the odometer readings of the next maintenance and tire change.
///
/// # Examples
///
/// ```
/// use haulage_pricing::calculation::{VehicleCostParams, calculate_vehicle_costs};
/// use haulage_pricing::models::Vehicle;
/// use rust_decimal::Decimal;
///
/// let vehicle: Vehicle = serde_json::from_str(r#"{
///     "id": "veh_001",
///     "year": 2024,
///     "fuel_consumption": "32",
///     "monthly_leasing": "1500",
///     "insurance_cost": "4000"
/// }"#).unwrap();
/// let params = VehicleCostParams {
///     fuel_price_ht: Decimal::new(145, 2),
///     ad_blue_price_ht: Decimal::new(50, 2),
///     estimated_annual_km: None,
///     reference_year: 2024,
/// };
///
/// let breakdown = calculate_vehicle_costs(&vehicle, &params);
/// assert_eq!(breakdown.total_annual_fixed_cost, Decimal::from(22000));
/// ```
pub fn calculate_vehicle_costs(vehicle: &Vehicle, params: &VehicleCostParams) -> VehicleCostBreakdown {
    let estimated_annual_km = params.annual_km();

    let depreciation = calculate_vehicle_depreciation(vehicle, params.reference_year);
    let annual_depreciation = depreciation
        .as_ref()
        .map_or(Decimal::ZERO, |d| d.annual_depreciation);
    let depreciation_cost_per_km = depreciation
        .as_ref()
        .map_or(Decimal::ZERO, |d| d.depreciation_per_km);

    let maintenance_cost_per_km = maintenance_cost_per_km(&vehicle.maintenances);
    let tire_cost_per_km = tire_cost_per_km(&vehicle.tires);
    let annual_maintenance_cost = maintenance_cost_per_km.saturating_mul(estimated_annual_km);
    let annual_tire_cost = tire_cost_per_km.saturating_mul(estimated_annual_km);

    let annual_insurance_cost = vehicle.insurance_cost;
    let annual_sinister_charge = vehicle.sinister_charge;
    let annual_leasing_cost = vehicle.monthly_leasing.saturating_mul(Decimal::from(12));

    let total_annual_fixed_cost = saturating_sum([
        annual_maintenance_cost,
        annual_tire_cost,
        annual_insurance_cost,
        annual_sinister_charge,
        annual_leasing_cost,
        annual_depreciation,
    ]);

    let fuel_cost_per_km =
        (vehicle.fuel_consumption / Decimal::ONE_HUNDRED).saturating_mul(params.fuel_price_ht);
    let ad_blue_cost_per_km = (vehicle.ad_blue_consumption / Decimal::ONE_HUNDRED)
        .saturating_mul(params.ad_blue_price_ht);
    let fixed_cost_per_km = divide_or_zero(
        saturating_sum([annual_insurance_cost, annual_sinister_charge, annual_leasing_cost]),
        estimated_annual_km,
    );

    let total_cost_per_km = saturating_sum([
        maintenance_cost_per_km,
        tire_cost_per_km,
        fuel_cost_per_km,
        ad_blue_cost_per_km,
        fixed_cost_per_km,
        depreciation_cost_per_km,
    ]);

    let next_maintenance_km = next_due_km(
        vehicle.current_km,
        vehicle.maintenances.iter().map(|m| (m.interval_km, m.last_km)),
    );
    let next_tire_change_km = next_due_km(
        vehicle.current_km,
        vehicle
            .tires
            .iter()
            .map(|t| (t.durability_km, t.last_change_km)),
    );

    VehicleCostBreakdown {
        annual_maintenance_cost,
        annual_tire_cost,
        annual_insurance_cost,
        annual_sinister_charge,
        annual_leasing_cost,
        annual_depreciation,
        total_annual_fixed_cost,
        maintenance_cost_per_km,
        tire_cost_per_km,
        fuel_cost_per_km,
        ad_blue_cost_per_km,
        fixed_cost_per_km,
        depreciation_cost_per_km,
        total_cost_per_km,
        depreciation,
        estimated_annual_km,
        next_maintenance_km,
        next_tire_change_km,
    }
}

/// Computes the full cost breakdown of a trailer.
///
/// Fuel prices in `params` are ignored; trailers consume nothing.
pub fn calculate_trailer_costs(trailer: &Trailer, params: &VehicleCostParams) -> TrailerCostBreakdown {
    let estimated_annual_km = params.annual_km();

    let depreciation = calculate_trailer_depreciation(trailer, params.reference_year);
    let annual_depreciation = depreciation
        .as_ref()
        .map_or(Decimal::ZERO, |d| d.annual_depreciation);
    let depreciation_cost_per_km = depreciation
        .as_ref()
        .map_or(Decimal::ZERO, |d| d.depreciation_per_km);

    let maintenance_cost_per_km = maintenance_cost_per_km(&trailer.maintenances);
    let tire_cost_per_km = tire_cost_per_km(&trailer.tires);
    let annual_maintenance_cost = maintenance_cost_per_km.saturating_mul(estimated_annual_km);
    let annual_tire_cost = tire_cost_per_km.saturating_mul(estimated_annual_km);

    let annual_insurance_cost = trailer.insurance_cost;
    let annual_leasing_cost = trailer.monthly_leasing.saturating_mul(Decimal::from(12));

    let total_annual_fixed_cost = saturating_sum([
        annual_maintenance_cost,
        annual_tire_cost,
        annual_insurance_cost,
        annual_leasing_cost,
        annual_depreciation,
    ]);

    let fixed_cost_per_km = divide_or_zero(
        annual_insurance_cost.saturating_add(annual_leasing_cost),
        estimated_annual_km,
    );
    let total_cost_per_km = saturating_sum([
        maintenance_cost_per_km,
        tire_cost_per_km,
        fixed_cost_per_km,
        depreciation_cost_per_km,
    ]);

    TrailerCostBreakdown {
        annual_maintenance_cost,
        annual_tire_cost,
        annual_insurance_cost,
        annual_leasing_cost,
        annual_depreciation,
        total_annual_fixed_cost,
        maintenance_cost_per_km,
        tire_cost_per_km,
        fixed_cost_per_km,
        depreciation_cost_per_km,
        total_cost_per_km,
        depreciation,
        estimated_annual_km,
    }
}

/// Resolves a vehicle into the figures the trip cost aggregator needs.
pub fn fleet_unit_for_vehicle(vehicle: &Vehicle, params: &VehicleCostParams) -> FleetUnit {
    let breakdown = calculate_vehicle_costs(vehicle, params);
    FleetUnit {
        id: vehicle.id.clone(),
        fuel_consumption: vehicle.fuel_consumption,
        ad_blue_consumption: vehicle.ad_blue_consumption,
        total_annual_fixed_cost: breakdown.total_annual_fixed_cost,
    }
}

/// Resolves a trailer into the figures the trip cost aggregator needs.
pub fn fleet_unit_for_trailer(trailer: &Trailer, params: &VehicleCostParams) -> FleetUnit {
    let breakdown = calculate_trailer_costs(trailer, params);
    FleetUnit {
        id: trailer.id.clone(),
        fuel_consumption: Decimal::ZERO,
        ad_blue_consumption: Decimal::ZERO,
        total_annual_fixed_cost: breakdown.total_annual_fixed_cost,
    }
}
