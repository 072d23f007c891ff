//! Application-wide settings used as amortization denominators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Global settings shared by every calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// VAT rate in percent.
    pub tva_rate: Decimal,
    /// Working days in a month, used for monthly charges.
    pub working_days_per_month: Decimal,
    /// Working days in a year, used for yearly charges and fleet costs.
    pub working_days_per_year: Decimal,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::with_monthly_days(Decimal::new(21, 0))
    }
}

impl AppSettings {
    /// Builds settings at the default 20% VAT with the yearly count derived
    /// as twelve months of working days.
    ///
    /// # Examples
    ///
    /// ```
    /// use haulage_pricing::models::AppSettings;
    /// use rust_decimal::Decimal;
    ///
    /// let settings = AppSettings::with_monthly_days(Decimal::from(21));
    /// assert_eq!(settings.working_days_per_year, Decimal::from(252));
    /// ```
    pub fn with_monthly_days(working_days_per_month: Decimal) -> Self {
        Self {
            tva_rate: Decimal::new(20, 0),
            working_days_per_month,
            working_days_per_year: working_days_per_month * Decimal::from(12),
        }
    }

    /// Checks that the settings can be used as amortization denominators.
    ///
    /// The engine itself never fails on bad settings (it degrades to zero),
    /// so this is applied where settings enter the system.
    pub fn validate(&self) -> EngineResult<()> {
        if self.tva_rate < Decimal::ZERO || self.tva_rate > Decimal::ONE_HUNDRED {
            return Err(EngineError::InvalidSettings {
                field: "tva_rate".to_string(),
                message: format!("must be between 0 and 100, got {}", self.tva_rate),
            });
        }
        if self.working_days_per_month <= Decimal::ZERO {
            return Err(EngineError::InvalidSettings {
                field: "working_days_per_month".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.working_days_per_year <= Decimal::ZERO {
            return Err(EngineError::InvalidSettings {
                field: "working_days_per_year".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.tva_rate, Decimal::from(20));
        assert_eq!(settings.working_days_per_month, Decimal::from(21));
        assert_eq!(settings.working_days_per_year, Decimal::from(252));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_days_per_year_is_rejected() {
        let settings = AppSettings {
            working_days_per_year: Decimal::ZERO,
            ..AppSettings::default()
        };
        match settings.validate().unwrap_err() {
            EngineError::InvalidSettings { field, .. } => {
                assert_eq!(field, "working_days_per_year");
            }
            other => panic!("Expected InvalidSettings, got {:?}", other),
        }
    }

    #[test]
    fn test_vat_above_hundred_is_rejected() {
        let settings = AppSettings {
            tva_rate: Decimal::from(120),
            ..AppSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_vat_is_accepted() {
        let settings = AppSettings {
            tva_rate: Decimal::ZERO,
            ..AppSettings::default()
        };
        assert!(settings.validate().is_ok());
    }
}
