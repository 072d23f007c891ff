//! Configuration types for the pricing engine.
//!
//! These structures are deserialized from the YAML files of a configuration
//! directory and resolved into the models the engine consumes.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{AppSettings, MarginAlertSettings, VehicleParams};

/// Contents of `settings.yaml`.
///
/// `working_days_per_year` may be omitted, in which case it is derived as
/// twelve months of working days.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsFile {
    /// VAT rate in percent.
    pub tva_rate: Decimal,
    /// Working days in a month.
    pub working_days_per_month: Decimal,
    /// Working days in a year.
    #[serde(default)]
    pub working_days_per_year: Option<Decimal>,
}

impl SettingsFile {
    /// Resolves the file into [`AppSettings`].
    pub fn into_settings(self) -> AppSettings {
        let derived = AppSettings::with_monthly_days(self.working_days_per_month);
        AppSettings {
            tva_rate: self.tva_rate,
            working_days_per_month: derived.working_days_per_month,
            working_days_per_year: self
                .working_days_per_year
                .unwrap_or(derived.working_days_per_year),
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Amortization denominators and VAT rate.
    pub settings: AppSettings,
    /// Default unit prices and consumption.
    pub vehicle_params: VehicleParams,
    /// Margin alert thresholds.
    pub margin_alerts: MarginAlertSettings,
}

impl EngineConfig {
    /// Creates a new configuration from its parts.
    pub fn new(
        settings: AppSettings,
        vehicle_params: VehicleParams,
        margin_alerts: MarginAlertSettings,
    ) -> Self {
        Self {
            settings,
            vehicle_params,
            margin_alerts,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(
            AppSettings::default(),
            VehicleParams::default(),
            MarginAlertSettings::default(),
        )
    }
}
