//! Fleet models: vehicles, trailers and their running-cost inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a vehicle or trailer loses book value over time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepreciationMethod {
    /// Same amount every year.
    #[default]
    Linear,
    /// Accelerated: a coefficient-weighted rate on the remaining value.
    Degressive,
    /// Proportional to kilometres driven over the expected lifetime.
    Km,
}

/// Optional depreciation settings; absent or zero values take the asset's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationTerms {
    /// Depreciation period in years.
    #[serde(default)]
    pub years: Option<u32>,
    /// Value remaining at the end of the period.
    #[serde(default)]
    pub residual_value: Option<Decimal>,
    /// Depreciation method.
    #[serde(default)]
    pub method: Option<DepreciationMethod>,
    /// Expected lifetime in kilometres, used by the `km` method.
    #[serde(default)]
    pub expected_lifetime_km: Option<Decimal>,
}

/// A recurring maintenance operation (inspection, oil change, brakes...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintenance {
    /// Name of the operation.
    #[serde(default)]
    pub name: String,
    /// Kilometres between two occurrences.
    pub interval_km: Decimal,
    /// Odometer reading at the last occurrence.
    #[serde(default)]
    pub last_km: Decimal,
    /// Average cost of one occurrence.
    pub cost: Decimal,
}

/// A set of identical tires mounted on one axle group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TireSet {
    /// Price of a single tire.
    pub price_per_unit: Decimal,
    /// Number of tires in the set.
    pub quantity: u32,
    /// Expected lifetime of the set in kilometres.
    pub durability_km: Decimal,
    /// Odometer reading at the last change.
    #[serde(default)]
    pub last_change_km: Decimal,
}

impl TireSet {
    /// Cost of replacing the whole set.
    pub fn set_cost(&self) -> Decimal {
        self.price_per_unit.saturating_mul(Decimal::from(self.quantity))
    }
}

/// A motorised vehicle (tractor, rigid truck, van).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique identifier for the vehicle.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Registration plate.
    #[serde(default)]
    pub license_plate: String,
    /// Model year, used to compute the age for depreciation.
    pub year: i32,
    /// Fuel consumption in litres per 100 km.
    pub fuel_consumption: Decimal,
    /// AdBlue consumption in litres per 100 km.
    #[serde(default)]
    pub ad_blue_consumption: Decimal,
    /// Current odometer reading.
    #[serde(default)]
    pub current_km: Decimal,
    /// Purchase price; zero for leased vehicles.
    #[serde(default)]
    pub purchase_price: Decimal,
    /// Monthly leasing instalment.
    #[serde(default)]
    pub monthly_leasing: Decimal,
    /// Annual insurance premium.
    #[serde(default)]
    pub insurance_cost: Decimal,
    /// Annual provision for claims.
    #[serde(default)]
    pub sinister_charge: Decimal,
    /// Depreciation settings.
    #[serde(default)]
    pub depreciation: DepreciationTerms,
    /// Scheduled maintenance operations.
    #[serde(default)]
    pub maintenances: Vec<Maintenance>,
    /// Mounted tire sets.
    #[serde(default)]
    pub tires: Vec<TireSet>,
}

/// A semi-trailer. Trailers burn no fuel and carry no claims provision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trailer {
    /// Unique identifier for the trailer.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Registration plate.
    #[serde(default)]
    pub license_plate: String,
    /// Model year.
    pub year: i32,
    /// Current odometer reading.
    #[serde(default)]
    pub current_km: Decimal,
    /// Purchase price; zero for leased trailers.
    #[serde(default)]
    pub purchase_price: Decimal,
    /// Monthly leasing instalment.
    #[serde(default)]
    pub monthly_leasing: Decimal,
    /// Annual insurance premium.
    #[serde(default)]
    pub insurance_cost: Decimal,
    /// Depreciation settings.
    #[serde(default)]
    pub depreciation: DepreciationTerms,
    /// Scheduled maintenance operations.
    #[serde(default)]
    pub maintenances: Vec<Maintenance>,
    /// Mounted tire sets.
    #[serde(default)]
    pub tires: Vec<TireSet>,
}

/// Default consumption and unit prices used when no vehicle is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleParams {
    /// Fuel consumption in litres per 100 km.
    pub fuel_consumption: Decimal,
    /// Fuel price per litre.
    pub fuel_price: Decimal,
    /// Whether `fuel_price` is already tax-exclusive.
    #[serde(default)]
    pub fuel_price_is_ht: bool,
    /// AdBlue consumption in litres per 100 km.
    #[serde(default)]
    pub ad_blue_consumption: Decimal,
    /// AdBlue price per litre.
    #[serde(default)]
    pub ad_blue_price: Decimal,
    /// Whether `ad_blue_price` is already tax-exclusive.
    #[serde(default)]
    pub ad_blue_price_is_ht: bool,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            fuel_consumption: Decimal::new(32, 0),
            fuel_price: Decimal::new(145, 2),
            fuel_price_is_ht: true,
            ad_blue_consumption: Decimal::new(15, 1),
            ad_blue_price: Decimal::new(50, 2),
            ad_blue_price_is_ht: true,
        }
    }
}

/// What the trip cost aggregator needs from a selected vehicle or trailer.
///
/// The annual fixed cost is resolved beforehand, typically with
/// [`calculate_vehicle_costs`](crate::calculation::calculate_vehicle_costs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetUnit {
    /// Identifier of the vehicle or trailer.
    pub id: String,
    /// Fuel consumption in litres per 100 km (zero for trailers).
    #[serde(default)]
    pub fuel_consumption: Decimal,
    /// AdBlue consumption in litres per 100 km (zero for trailers).
    #[serde(default)]
    pub ad_blue_consumption: Decimal,
    /// Leasing, insurance, claims, depreciation, maintenance and tires for one year.
    pub total_annual_fixed_cost: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_minimal_vehicle() {
        let json = r#"{
            "id": "veh_001",
            "year": 2021,
            "fuel_consumption": "31.5"
        }"#;

        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.fuel_consumption, dec("31.5"));
        assert_eq!(vehicle.ad_blue_consumption, Decimal::ZERO);
        assert!(vehicle.maintenances.is_empty());
        assert_eq!(vehicle.depreciation, DepreciationTerms::default());
    }

    #[test]
    fn test_deserialize_trailer_with_depreciation() {
        let json = r#"{
            "id": "trl_001",
            "year": 2019,
            "purchase_price": "45000",
            "depreciation": { "years": 7, "method": "degressive" }
        }"#;

        let trailer: Trailer = serde_json::from_str(json).unwrap();
        assert_eq!(trailer.depreciation.years, Some(7));
        assert_eq!(
            trailer.depreciation.method,
            Some(DepreciationMethod::Degressive)
        );
    }

    #[test]
    fn test_tire_set_cost() {
        let tires = TireSet {
            price_per_unit: dec("450"),
            quantity: 6,
            durability_km: dec("150000"),
            last_change_km: Decimal::ZERO,
        };
        assert_eq!(tires.set_cost(), dec("2700"));
    }

    #[test]
    fn test_vehicle_params_defaults() {
        let params = VehicleParams::default();
        assert_eq!(params.fuel_consumption, dec("32"));
        assert_eq!(params.fuel_price, dec("1.45"));
        assert!(params.fuel_price_is_ht);
        assert_eq!(params.ad_blue_consumption, dec("1.5"));
        assert_eq!(params.ad_blue_price, dec("0.50"));
    }
}
