//! Request types for the pricing engine API.
//!
//! Vehicles and trailers arrive as full records; the handlers resolve them
//! into [`FleetUnit`](crate::models::FleetUnit)s before costing the trip.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::MAX_DEPRECIATION_YEARS;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AlertKey, AppSettings, Driver, FixedCharge, Trailer, TripCalculation, Vehicle, VehicleParams,
};

/// Request body for the `/quote` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// The trip to price.
    pub trip: TripCalculation,
    /// Unit prices and default consumption; the configured defaults when absent.
    #[serde(default)]
    pub vehicle_params: Option<VehicleParams>,
    /// Selected vehicles.
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    /// Selected trailer.
    #[serde(default)]
    pub trailer: Option<Trailer>,
    /// Assigned drivers.
    #[serde(default)]
    pub drivers: Vec<Driver>,
    /// Recurring fixed charges.
    #[serde(default)]
    pub charges: Vec<FixedCharge>,
    /// Overrides the configured settings for this request.
    #[serde(default)]
    pub settings: Option<AppSettings>,
    /// Year against which vehicle age is measured; the current year when absent.
    #[serde(default)]
    pub reference_year: Option<i32>,
    /// Kilometres per year used for maintenance and tire costs.
    #[serde(default)]
    pub estimated_annual_km: Option<Decimal>,
}

/// Largest distance, price, duration or stop count a request may carry.
pub fn max_request_value() -> Decimal {
    Decimal::new(1_000_000_000_000, 0)
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidRequest {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Rejects negative values and values above [`max_request_value`].
fn check_amount(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid(field, "must not be negative"));
    }
    if value > max_request_value() {
        return Err(invalid(
            field,
            format!("must not exceed {}", max_request_value()),
        ));
    }
    Ok(())
}

fn check_depreciation_years(field: &str, years: Option<u32>) -> EngineResult<()> {
    match years {
        Some(years) if years > MAX_DEPRECIATION_YEARS => Err(invalid(
            field,
            format!("must not exceed {} years", MAX_DEPRECIATION_YEARS),
        )),
        _ => Ok(()),
    }
}

impl QuoteRequest {
    /// Rejects values that cannot describe a real trip.
    pub fn validate(&self) -> EngineResult<()> {
        let trip = &self.trip;
        check_amount("trip.distance", trip.distance)?;
        check_amount("trip.toll_cost", trip.toll_cost)?;
        check_amount("trip.price_per_km", trip.price_per_km)?;
        check_amount("trip.fixed_price", trip.fixed_price)?;
        check_amount("trip.target_margin", trip.target_margin.abs())?;
        check_amount("trip.hourly_rate", trip.hourly_rate.unwrap_or_default())?;
        check_amount("trip.estimated_hours", trip.estimated_hours.unwrap_or_default())?;
        check_amount("trip.price_per_stop", trip.price_per_stop.unwrap_or_default())?;
        check_amount(
            "trip.number_of_stops",
            Decimal::from(trip.number_of_stops.unwrap_or_default()),
        )?;
        if let Some(estimated_annual_km) = self.estimated_annual_km {
            check_amount("estimated_annual_km", estimated_annual_km)?;
        }
        for vehicle in &self.vehicles {
            check_depreciation_years("vehicles.depreciation.years", vehicle.depreciation.years)?;
        }
        if let Some(trailer) = &self.trailer {
            check_depreciation_years("trailer.depreciation.years", trailer.depreciation.years)?;
        }
        if let Some(settings) = &self.settings {
            settings.validate()?;
        }
        Ok(())
    }
}

/// Request body for the `/margin-alert` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginAlertRequest {
    /// Profit of the trip.
    pub profit: Decimal,
    /// Profit margin in percent.
    pub margin: Decimal,
    /// The key returned by the previous call, if any.
    #[serde(default)]
    pub last_key: Option<AlertKey>,
}

/// Request body for the `/fleet/vehicle-cost` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleCostRequest {
    /// The vehicle to cost.
    pub vehicle: Vehicle,
    /// Unit prices; the configured defaults when absent.
    #[serde(default)]
    pub vehicle_params: Option<VehicleParams>,
    /// Kilometres per year.
    #[serde(default)]
    pub estimated_annual_km: Option<Decimal>,
    /// Year against which the vehicle's age is measured.
    #[serde(default)]
    pub reference_year: Option<i32>,
}

/// Request body for the `/fleet/trailer-cost` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailerCostRequest {
    /// The trailer to cost.
    pub trailer: Trailer,
    /// Kilometres per year.
    #[serde(default)]
    pub estimated_annual_km: Option<Decimal>,
    /// Year against which the trailer's age is measured.
    #[serde(default)]
    pub reference_year: Option<i32>,
}

impl VehicleCostRequest {
    /// Rejects depreciation schedules and mileage the cost model cannot use.
    pub fn validate(&self) -> EngineResult<()> {
        check_depreciation_years("vehicle.depreciation.years", self.vehicle.depreciation.years)?;
        if let Some(estimated_annual_km) = self.estimated_annual_km {
            check_amount("estimated_annual_km", estimated_annual_km)?;
        }
        Ok(())
    }
}

impl TrailerCostRequest {
    /// Rejects depreciation schedules and mileage the cost model cannot use.
    pub fn validate(&self) -> EngineResult<()> {
        check_depreciation_years("trailer.depreciation.years", self.trailer.depreciation.years)?;
        if let Some(estimated_annual_km) = self.estimated_annual_km {
            check_amount("estimated_annual_km", estimated_annual_km)?;
        }
        Ok(())
    }
}
