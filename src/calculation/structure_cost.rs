//! Structure cost: recurring fixed charges spread onto one trip day.

use rust_decimal::Decimal;

use crate::calculation::tax::{divide_or_zero, to_ht};
use crate::models::{AppSettings, AuditStep, AuditWarning, FixedCharge, Periodicity};

/// The share of fixed charges attributed to one trip day.
#[derive(Debug, Clone)]
pub struct StructureCostResult {
    /// Sum of the daily tax-exclusive shares.
    pub structure_cost: Decimal,
    /// Charges that were left out.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Daily tax-exclusive share of one charge.
///
/// Returns `None` for a periodicity the engine cannot amortize.
///
/// # Examples
///
/// ```
/// use haulage_pricing::calculation::daily_charge_amount;
/// use haulage_pricing::models::{AppSettings, ChargeCategory, FixedCharge, Periodicity};
/// use rust_decimal::Decimal;
///
/// let charge = FixedCharge {
///     id: "chg_001".to_string(),
///     name: "Loyer".to_string(),
///     amount: Decimal::from(600),
///     is_ht: true,
///     periodicity: Periodicity::Monthly,
///     category: ChargeCategory::Other,
/// };
/// let settings = AppSettings::with_monthly_days(Decimal::from(20));
///
/// assert_eq!(daily_charge_amount(&charge, &settings), Some(Decimal::from(30)));
/// ```
pub fn daily_charge_amount(charge: &FixedCharge, settings: &AppSettings) -> Option<Decimal> {
    let amount_ht = to_ht(charge.amount, settings.tva_rate, charge.is_ht);
    match charge.periodicity {
        Periodicity::Daily => Some(amount_ht),
        Periodicity::Monthly => Some(divide_or_zero(amount_ht, settings.working_days_per_month)),
        Periodicity::Yearly => Some(divide_or_zero(amount_ht, settings.working_days_per_year)),
        Periodicity::Unrecognized => None,
    }
}

/// Sums the daily shares of every fixed charge.
///
/// Charges with an unrecognized periodicity contribute zero and are reported
/// as warnings.
///
/// # Arguments
///
/// * `charges` - The recurring fixed charges of the business
/// * `settings` - Supplies the VAT rate and the working days per month and year
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns a `StructureCostResult` with the tax-exclusive daily structure
/// cost, an audit step and one warning per ignored charge.
pub fn amortize_charges(
    charges: &[FixedCharge],
    settings: &AppSettings,
    step_number: u32,
) -> StructureCostResult {
    let mut structure_cost = Decimal::ZERO;
    let mut warnings = Vec::new();
    let mut ignored = 0usize;

    for charge in charges {
        match daily_charge_amount(charge, settings) {
            Some(daily) => structure_cost = structure_cost.saturating_add(daily),
            None => {
                ignored += 1;
                warnings.push(AuditWarning {
                    code: "UNRECOGNIZED_PERIODICITY".to_string(),
                    message: format!(
                        "Charge '{}' has no daily, monthly or yearly periodicity and was not counted",
                        charge.id
                    ),
                    severity: "medium".to_string(),
                });
            }
        }
    }

    let reasoning = if charges.is_empty() {
        "No fixed charge - structure cost is zero".to_string()
    } else {
        format!(
            "{} charge(s) amortized to {} / day ({} ignored)",
            charges.len() - ignored,
            structure_cost.normalize(),
            ignored
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "structure_cost".to_string(),
        rule_name: "Structure Cost".to_string(),
        input: serde_json::json!({
            "charges_count": charges.len(),
            "tva_rate": settings.tva_rate.normalize().to_string(),
            "working_days_per_month": settings.working_days_per_month.normalize().to_string(),
            "working_days_per_year": settings.working_days_per_year.normalize().to_string()
        }),
        output: serde_json::json!({
            "structure_cost": structure_cost.normalize().to_string(),
            "ignored_charges": ignored
        }),
        reasoning,
    };

    StructureCostResult {
        structure_cost,
        warnings,
        audit_step,
    }
}
