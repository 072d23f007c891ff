//! Margin alert evaluation.
//!
//! Alerts are evaluated from scratch on every call. The only state that
//! survives between calls is the last notified [`AlertKey`], which the caller
//! owns and threads back in.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{AlertKey, AlertKind, MarginAlert, MarginAlertSettings, Severity};

/// Outcome of [`check_margin`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginCheck {
    /// The alert raised for this evaluation, if any.
    pub alert: Option<MarginAlert>,
    /// Whether the alert differs from the last notified one.
    pub notify: bool,
    /// The key to pass to the next call.
    pub last_key: Option<AlertKey>,
}

/// Rounds half-up toward positive infinity, so `-2.5` becomes `-2`.
pub fn round_half_up(value: Decimal) -> i64 {
    let rounded = (value + Decimal::new(5, 1)).floor();
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Formats with a fixed number of decimals, rounding halves away from zero.
fn fixed(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimals as usize, rounded)
}

/// Evaluates the margin of a trip against the alert settings.
///
/// The loss check runs first: a trip that loses money always reports the
/// absolute loss, even when its margin would also sit under the threshold.
///
/// # Examples
///
/// ```
/// use haulage_pricing::calculation::evaluate_margin;
/// use haulage_pricing::models::{AlertKind, MarginAlertSettings};
/// use rust_decimal::Decimal;
///
/// let alert = evaluate_margin(
///     Decimal::from(120),
///     Decimal::from(7),
///     &MarginAlertSettings::default(),
/// )
/// .unwrap();
/// assert_eq!(alert.kind, AlertKind::BelowThreshold);
/// ```
pub fn evaluate_margin(
    profit: Decimal,
    margin: Decimal,
    settings: &MarginAlertSettings,
) -> Option<MarginAlert> {
    if !settings.enabled {
        return None;
    }

    let min = settings.min_margin_percent;

    if settings.alert_on_negative_profit && profit < Decimal::ZERO {
        return Some(MarginAlert {
            kind: AlertKind::Critical,
            severity: AlertKind::Critical.severity(),
            message: format!("This trip loses {} €", fixed(profit.abs(), 2)),
            current_margin: margin,
            threshold: Decimal::ZERO,
        });
    }

    if settings.alert_on_below_threshold && margin < min && margin >= Decimal::ZERO {
        let kind = if margin < min / Decimal::TWO {
            AlertKind::Critical
        } else {
            AlertKind::BelowThreshold
        };
        return Some(MarginAlert {
            kind,
            severity: kind.severity(),
            message: format!(
                "Low margin: {}% (threshold: {}%)",
                fixed(margin, 1),
                min.normalize()
            ),
            current_margin: margin,
            threshold: min,
        });
    }

    if settings.alert_on_negative_profit && margin < Decimal::ZERO {
        return Some(MarginAlert {
            kind: AlertKind::Negative,
            severity: AlertKind::Negative.severity(),
            message: format!("Negative margin: {}%", fixed(margin, 1)),
            current_margin: margin,
            threshold: Decimal::ZERO,
        });
    }

    None
}

/// Classifies a margin for display, independently of profit.
pub fn alert_severity(margin: Decimal, settings: &MarginAlertSettings) -> Severity {
    if !settings.enabled {
        return Severity::None;
    }
    let min = settings.min_margin_percent;
    if margin < Decimal::ZERO || margin < min / Decimal::TWO {
        Severity::Critical
    } else if margin < min {
        Severity::Warning
    } else {
        Severity::None
    }
}

/// Evaluates a margin and decides whether the alert should be notified.
///
/// A repeat of `last_key` is still returned as an alert but not notified.
/// When nothing fires the previous key is kept.
///
/// # Arguments
///
/// * `profit` - Revenue minus total cost
/// * `margin` - Profit margin in percent
/// * `settings` - Alert toggles and the minimum margin
/// * `last_key` - The key returned by the previous call, if any
///
/// # Returns
///
/// Returns a `MarginCheck` with the alert, whether to notify it, and the key
/// to thread into the next call.
pub fn check_margin(
    profit: Decimal,
    margin: Decimal,
    settings: &MarginAlertSettings,
    last_key: Option<&AlertKey>,
) -> MarginCheck {
    let alert = evaluate_margin(profit, margin, settings);

    match alert {
        Some(alert) => {
            let key = AlertKey {
                kind: alert.kind,
                rounded_margin: round_half_up(margin),
            };
            MarginCheck {
                notify: last_key != Some(&key),
                last_key: Some(key),
                alert: Some(alert),
            }
        }
        None => MarginCheck {
            alert: None,
            notify: false,
            last_key: last_key.copied(),
        },
    }
}
