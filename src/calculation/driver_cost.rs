//! Driver cost resolution.
//!
//! Turns the drivers assigned to a trip into the employer cost of one
//! working day, split into base cost, bonuses and allowances.

use rust_decimal::Decimal;

use crate::calculation::tax::{divide_or_zero, saturating_sum};
use crate::models::{AuditStep, AuditWarning, Driver, DriverContract};

/// The daily cost of a single driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverCostLine {
    /// The driver this line was computed for.
    pub driver_id: String,
    /// Wire name of the driver's contract type.
    pub contract_type: &'static str,
    /// Base employer cost for the day.
    pub cost: Decimal,
    /// Prorated bonuses.
    pub bonuses: Decimal,
    /// Daily allowances.
    pub allowances: Decimal,
}

/// The combined daily cost of every driver on a trip.
#[derive(Debug, Clone)]
pub struct DriverCostResult {
    /// Sum of the base employer costs.
    pub driver_cost: Decimal,
    /// Sum of the prorated bonuses.
    pub driver_bonuses: Decimal,
    /// Sum of the daily allowances.
    pub driver_allowances: Decimal,
    /// Per-driver detail, in selection order.
    pub lines: Vec<DriverCostLine>,
    /// Drivers whose data had to be degraded to zero.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the daily cost of one driver.
///
/// - `autre`: nothing.
/// - `interim`: hourly rate x agency coefficient x hours per day, plus the
///   meal allowance. No bonuses.
/// - `cdi` / `cdd`: monthly employer cost and monthly bonuses divided by the
///   driver's working days per month, plus meal and overnight allowances.
///   A zero day count yields zero for the prorated parts.
///
/// # Examples
///
/// ```
/// use haulage_pricing::calculation::driver_daily_cost;
/// use haulage_pricing::models::{Driver, DriverContract, InterimTerms};
/// use rust_decimal::Decimal;
///
/// let driver = Driver {
///     id: "drv_001".to_string(),
///     name: "Agency driver".to_string(),
///     contract: DriverContract::Interim(InterimTerms {
///         interim_hourly_rate: Some(Decimal::from(15)),
///         hours_per_day: Some(Decimal::from(8)),
///         ..InterimTerms::default()
///     }),
/// };
///
/// assert_eq!(driver_daily_cost(&driver).cost, Decimal::from(222));
/// ```
pub fn driver_daily_cost(driver: &Driver) -> DriverCostLine {
    let (cost, bonuses, allowances) = match &driver.contract {
        DriverContract::Autre => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        DriverContract::Interim(terms) => {
            let cost = terms
                .effective_hourly_rate()
                .saturating_mul(terms.effective_coefficient())
                .saturating_mul(terms.effective_hours_per_day());
            (cost, Decimal::ZERO, terms.meal_allowance)
        }
        DriverContract::Cdi(terms) | DriverContract::Cdd(terms) => {
            let days = terms.working_days_per_month;
            (
                divide_or_zero(terms.monthly_employer_cost(), days),
                divide_or_zero(terms.monthly_bonuses(), days),
                terms.daily_allowances(),
            )
        }
    };

    DriverCostLine {
        driver_id: driver.id.clone(),
        contract_type: driver.contract.as_str(),
        cost,
        bonuses,
        allowances,
    }
}

/// Resolves the daily cost of all drivers assigned to a trip.
///
/// Costs are additive: a main driver and a relief driver both count. An
/// empty selection costs nothing.
///
/// # Arguments
///
/// * `drivers` - The drivers assigned to the trip, in any order
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns a `DriverCostResult` with the summed cost, bonuses and allowances,
/// one line per driver, an audit step and a warning for every salaried driver
/// without working days.
pub fn resolve_driver_costs(drivers: &[Driver], step_number: u32) -> DriverCostResult {
    let lines: Vec<DriverCostLine> = drivers.iter().map(driver_daily_cost).collect();

    let warnings: Vec<AuditWarning> = drivers
        .iter()
        .filter_map(|driver| match &driver.contract {
            DriverContract::Cdi(terms) | DriverContract::Cdd(terms)
                if terms.working_days_per_month <= Decimal::ZERO =>
            {
                Some(AuditWarning {
                    code: "ZERO_WORKING_DAYS".to_string(),
                    message: format!(
                        "Driver '{}' has no working days per month; salary and bonuses counted as zero",
                        driver.id
                    ),
                    severity: "high".to_string(),
                })
            }
            _ => None,
        })
        .collect();

    let driver_cost = saturating_sum(lines.iter().map(|l| l.cost));
    let driver_bonuses = saturating_sum(lines.iter().map(|l| l.bonuses));
    let driver_allowances = saturating_sum(lines.iter().map(|l| l.allowances));

    let reasoning = if lines.is_empty() {
        "No driver assigned - driver cost is zero".to_string()
    } else {
        let parts: Vec<String> = lines
            .iter()
            .map(|l| {
                format!(
                    "{} ({}): {} + {} + {}",
                    l.driver_id,
                    l.contract_type,
                    l.cost.normalize(),
                    l.bonuses.normalize(),
                    l.allowances.normalize()
                )
            })
            .collect();
        format!(
            "{} driver(s): {}",
            lines.len(),
            parts.join("; ")
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "driver_cost".to_string(),
        rule_name: "Driver Cost".to_string(),
        input: serde_json::json!({
            "drivers": lines
                .iter()
                .map(|l| serde_json::json!({
                    "id": l.driver_id,
                    "contract_type": l.contract_type
                }))
                .collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "driver_cost": driver_cost.normalize().to_string(),
            "driver_bonuses": driver_bonuses.normalize().to_string(),
            "driver_allowances": driver_allowances.normalize().to_string()
        }),
        reasoning,
    };

    DriverCostResult {
        driver_cost,
        driver_bonuses,
        driver_allowances,
        lines,
        warnings,
        audit_step,
    }
}
