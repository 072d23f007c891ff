//! Trip description and pricing mode.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the revenue of a trip is determined.
///
/// Unknown modes deserialize to `Auto`, which prices at the suggested price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Price per kilometre times distance.
    Km,
    /// A flat price agreed with the customer.
    Fixed,
    /// Hourly rate times estimated hours.
    Hourly,
    /// Price per kilometre plus a price per delivery stop.
    KmStops,
    /// Total cost inflated by the target margin.
    #[default]
    #[serde(other)]
    Auto,
}

impl PricingMode {
    /// Returns the wire name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingMode::Km => "km",
            PricingMode::Fixed => "fixed",
            PricingMode::Hourly => "hourly",
            PricingMode::KmStops => "km_stops",
            PricingMode::Auto => "auto",
        }
    }
}

/// The trip being priced.
///
/// Every field is optional on the wire; absent values are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripCalculation {
    /// Trip distance in kilometres.
    pub distance: Decimal,
    /// Total toll cost for the trip.
    pub toll_cost: Decimal,
    /// Whether `toll_cost` is already tax-exclusive.
    pub toll_is_ht: bool,
    /// How revenue is computed.
    pub pricing_mode: PricingMode,
    /// Price per kilometre (`km` and `km_stops` modes).
    pub price_per_km: Decimal,
    /// Flat price (`fixed` mode).
    pub fixed_price: Decimal,
    /// Margin percentage applied on cost for the suggested price.
    pub target_margin: Decimal,
    /// Hourly rate (`hourly` mode).
    pub hourly_rate: Option<Decimal>,
    /// Estimated duration in hours (`hourly` mode).
    pub estimated_hours: Option<Decimal>,
    /// Price per delivery stop (`km_stops` mode).
    pub price_per_stop: Option<Decimal>,
    /// Number of delivery stops (`km_stops` mode).
    pub number_of_stops: Option<u32>,
}
