//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AppSettings, MarginAlertSettings, VehicleParams};

use super::types::{EngineConfig, SettingsFile};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── settings.yaml       # VAT rate and working days
/// ├── vehicle.yaml        # Default consumption and unit prices
/// └── margin_alerts.yaml  # Margin alert thresholds
/// ```
///
/// # Example
///
/// ```no_run
/// use haulage_pricing::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("VAT rate: {}%", loader.settings().tva_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails if a file is missing, is not valid YAML, or if the settings
    /// cannot serve as amortization denominators.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<SettingsFile>(&path.join("settings.yaml"))?.into_settings();
        settings.validate()?;

        let vehicle_params = Self::load_yaml::<VehicleParams>(&path.join("vehicle.yaml"))?;
        let margin_alerts = Self::load_yaml::<MarginAlertSettings>(&path.join("margin_alerts.yaml"))?;

        debug!(
            path = %path.display(),
            tva_rate = %settings.tva_rate,
            working_days_per_year = %settings.working_days_per_year,
            "configuration loaded"
        );

        Ok(Self {
            config: EngineConfig::new(settings, vehicle_params, margin_alerts),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the full configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the application settings.
    pub fn settings(&self) -> &AppSettings {
        &self.config.settings
    }

    /// Returns the default vehicle parameters.
    pub fn vehicle_params(&self) -> &VehicleParams {
        &self.config.vehicle_params
    }

    /// Returns the margin alert settings.
    pub fn margin_alerts(&self) -> &MarginAlertSettings {
        &self.config.margin_alerts
    }
}
