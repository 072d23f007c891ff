//! Driver model and contract types.
//!
//! A driver's cost structure depends entirely on the contract under which
//! they are employed, so the contract is a tagged enum carrying only the
//! fields that contract needs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Agency multiplier applied to an interim driver's hourly rate when none is set.
pub fn default_interim_coefficient() -> Decimal {
    Decimal::new(185, 2)
}

/// Hours billed per day for an interim driver when none is set.
pub fn default_interim_hours_per_day() -> Decimal {
    Decimal::new(7, 0)
}

/// Terms of a salaried (CDI or CDD) driver.
///
/// Salary and bonuses are monthly amounts; allowances are already daily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalariedTerms {
    /// Gross monthly base salary.
    pub base_salary: Decimal,
    /// Employer overhead as a percentage of the base salary.
    pub patronal_charges: Decimal,
    /// Number of days worked per month, used to prorate monthly amounts.
    pub working_days_per_month: Decimal,
    /// Monthly night work bonus.
    #[serde(default)]
    pub night_bonus: Decimal,
    /// Monthly Sunday work bonus.
    #[serde(default)]
    pub sunday_bonus: Decimal,
    /// Monthly seniority bonus.
    #[serde(default)]
    pub seniority_bonus: Decimal,
    /// Daily meal allowance.
    #[serde(default)]
    pub meal_allowance: Decimal,
    /// Daily overnight allowance.
    #[serde(default)]
    pub overnight_allowance: Decimal,
}

impl SalariedTerms {
    /// Monthly employer cost: base salary inflated by the patronal charges.
    pub fn monthly_employer_cost(&self) -> Decimal {
        self.base_salary
            .saturating_mul(Decimal::ONE + self.patronal_charges / Decimal::ONE_HUNDRED)
    }

    /// Sum of the monthly night, Sunday and seniority bonuses.
    pub fn monthly_bonuses(&self) -> Decimal {
        self.night_bonus
            .saturating_add(self.sunday_bonus)
            .saturating_add(self.seniority_bonus)
    }

    /// Sum of the daily meal and overnight allowances.
    pub fn daily_allowances(&self) -> Decimal {
        self.meal_allowance.saturating_add(self.overnight_allowance)
    }
}

/// Terms of a temporary-agency (interim) driver.
///
/// A zero value in any optional field is treated the same as an absent one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterimTerms {
    /// Hourly rate invoiced by the agency.
    #[serde(default)]
    pub interim_hourly_rate: Option<Decimal>,
    /// Gross hourly rate, used when no agency rate is recorded.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Agency coefficient applied on top of the hourly rate.
    #[serde(default)]
    pub interim_coefficient: Option<Decimal>,
    /// Hours billed per working day.
    #[serde(default)]
    pub hours_per_day: Option<Decimal>,
    /// Daily meal allowance paid by the haulier.
    #[serde(default)]
    pub meal_allowance: Decimal,
    /// Name of the staffing agency.
    #[serde(default)]
    pub agency: Option<String>,
}

fn non_zero(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}

impl InterimTerms {
    /// The hourly rate to bill: agency rate, then gross rate, then zero.
    pub fn effective_hourly_rate(&self) -> Decimal {
        non_zero(self.interim_hourly_rate)
            .or(non_zero(self.hourly_rate))
            .unwrap_or(Decimal::ZERO)
    }

    /// The agency coefficient, defaulting to 1.85.
    pub fn effective_coefficient(&self) -> Decimal {
        non_zero(self.interim_coefficient).unwrap_or_else(default_interim_coefficient)
    }

    /// Hours billed per day, defaulting to 7.
    pub fn effective_hours_per_day(&self) -> Decimal {
        non_zero(self.hours_per_day).unwrap_or_else(default_interim_hours_per_day)
    }
}

/// The contract a driver is employed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "contract_type", rename_all = "snake_case")]
pub enum DriverContract {
    /// Permanent contract (contrat à durée indéterminée).
    Cdi(SalariedTerms),
    /// Fixed-term contract (contrat à durée déterminée).
    Cdd(SalariedTerms),
    /// Temporary-agency driver billed by the hour.
    Interim(InterimTerms),
    /// Non-billable placeholder such as a trainee riding along.
    Autre,
}

impl DriverContract {
    /// Returns the wire name of the contract type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverContract::Cdi(_) => "cdi",
            DriverContract::Cdd(_) => "cdd",
            DriverContract::Interim(_) => "interim",
            DriverContract::Autre => "autre",
        }
    }
}

/// A driver that can be assigned to a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    /// Unique identifier for the driver.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Contract terms, tagged by `contract_type`.
    #[serde(flatten)]
    pub contract: DriverContract,
}

impl Driver {
    /// Returns true if the driver is paid a salary (CDI or CDD).
    pub fn is_salaried(&self) -> bool {
        matches!(
            self.contract,
            DriverContract::Cdi(_) | DriverContract::Cdd(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_cdi_driver() {
        let json = r#"{
            "id": "drv_001",
            "name": "Jean",
            "contract_type": "cdi",
            "base_salary": "2200",
            "patronal_charges": "45",
            "working_days_per_month": "21",
            "meal_allowance": "15.20"
        }"#;

        let driver: Driver = serde_json::from_str(json).unwrap();
        assert_eq!(driver.id, "drv_001");
        match &driver.contract {
            DriverContract::Cdi(terms) => {
                assert_eq!(terms.base_salary, dec("2200"));
                assert_eq!(terms.meal_allowance, dec("15.20"));
                assert_eq!(terms.night_bonus, Decimal::ZERO);
            }
            other => panic!("Expected Cdi, got {:?}", other),
        }
        assert!(driver.is_salaried());
    }

    #[test]
    fn test_deserialize_interim_driver_with_numbers() {
        let json = r#"{
            "id": "drv_002",
            "name": "Agence",
            "contract_type": "interim",
            "interim_hourly_rate": 15,
            "hours_per_day": 8
        }"#;

        let driver: Driver = serde_json::from_str(json).unwrap();
        match &driver.contract {
            DriverContract::Interim(terms) => {
                assert_eq!(terms.effective_hourly_rate(), dec("15"));
                assert_eq!(terms.effective_coefficient(), dec("1.85"));
                assert_eq!(terms.effective_hours_per_day(), dec("8"));
            }
            other => panic!("Expected Interim, got {:?}", other),
        }
        assert!(!driver.is_salaried());
    }

    #[test]
    fn test_deserialize_autre_driver() {
        let json = r#"{ "id": "drv_003", "contract_type": "autre" }"#;

        let driver: Driver = serde_json::from_str(json).unwrap();
        assert_eq!(driver.contract, DriverContract::Autre);
        assert_eq!(driver.contract.as_str(), "autre");
    }

    #[test]
    fn test_missing_contract_type_is_rejected() {
        let json = r#"{ "id": "drv_004", "base_salary": "2000" }"#;
        assert!(serde_json::from_str::<Driver>(json).is_err());
    }

    #[test]
    fn test_interim_rate_falls_back_to_hourly_rate() {
        let terms = InterimTerms {
            interim_hourly_rate: Some(Decimal::ZERO),
            hourly_rate: Some(dec("13.50")),
            ..InterimTerms::default()
        };
        assert_eq!(terms.effective_hourly_rate(), dec("13.50"));
    }

    #[test]
    fn test_interim_rate_defaults_to_zero() {
        let terms = InterimTerms::default();
        assert_eq!(terms.effective_hourly_rate(), Decimal::ZERO);
        assert_eq!(terms.effective_hours_per_day(), dec("7"));
    }

    #[test]
    fn test_salaried_terms_helpers() {
        let terms = SalariedTerms {
            base_salary: dec("2000"),
            patronal_charges: dec("50"),
            working_days_per_month: dec("20"),
            night_bonus: dec("100"),
            sunday_bonus: dec("60"),
            seniority_bonus: dec("40"),
            meal_allowance: dec("15"),
            overnight_allowance: dec("45"),
        };
        assert_eq!(terms.monthly_employer_cost(), dec("3000"));
        assert_eq!(terms.monthly_bonuses(), dec("200"));
        assert_eq!(terms.daily_allowances(), dec("60"));
    }

    #[test]
    fn test_contract_type_serialization() {
        let driver = Driver {
            id: "drv_005".to_string(),
            name: "Test".to_string(),
            contract: DriverContract::Interim(InterimTerms::default()),
        };
        let value = serde_json::to_value(&driver).unwrap();
        assert_eq!(value["contract_type"], "interim");
    }
}
