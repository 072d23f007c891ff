//! Recurring fixed charges of the business (structure costs).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often a fixed charge is incurred.
///
/// Any value outside daily/monthly/yearly deserializes to `Unrecognized`,
/// which contributes nothing to the structure cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Periodicity {
    /// Incurred every working day.
    Daily,
    /// Incurred once a month.
    Monthly,
    /// Incurred once a year.
    Yearly,
    /// A periodicity the engine does not know how to amortize.
    #[serde(other)]
    Unrecognized,
}

/// Informational grouping of a charge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeCategory {
    /// Insurance premiums.
    Insurance,
    /// Leasing of non-fleet equipment or premises.
    Leasing,
    /// Accounting, software, office.
    Administrative,
    /// Workshop and premises maintenance.
    Maintenance,
    /// Anything else.
    #[default]
    #[serde(other)]
    Other,
}

/// A recurring fixed charge to be spread over trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedCharge {
    /// Unique identifier for the charge.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Amount per period.
    pub amount: Decimal,
    /// Whether `amount` is already tax-exclusive.
    #[serde(default)]
    pub is_ht: bool,
    /// How often the amount is incurred.
    pub periodicity: Periodicity,
    /// Informational category.
    #[serde(default)]
    pub category: ChargeCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_monthly_charge() {
        let json = r#"{
            "id": "chg_001",
            "name": "Assurance flotte",
            "amount": "600",
            "is_ht": true,
            "periodicity": "monthly",
            "category": "insurance"
        }"#;

        let charge: FixedCharge = serde_json::from_str(json).unwrap();
        assert_eq!(charge.periodicity, Periodicity::Monthly);
        assert_eq!(charge.category, ChargeCategory::Insurance);
        assert!(charge.is_ht);
    }

    #[test]
    fn test_unknown_periodicity_is_unrecognized() {
        let json = r#"{ "id": "chg_002", "amount": "100", "periodicity": "weekly" }"#;

        let charge: FixedCharge = serde_json::from_str(json).unwrap();
        assert_eq!(charge.periodicity, Periodicity::Unrecognized);
        assert_eq!(charge.category, ChargeCategory::Other);
        assert!(!charge.is_ht);
    }

    #[test]
    fn test_unknown_category_is_other() {
        let json = r#"{
            "id": "chg_003",
            "amount": "100",
            "periodicity": "daily",
            "category": "fuel_cards"
        }"#;

        let charge: FixedCharge = serde_json::from_str(json).unwrap();
        assert_eq!(charge.category, ChargeCategory::Other);
    }
}
