//! Margin alert models.
//!
//! Alerts are produced by [`evaluate_margin`](crate::calculation::evaluate_margin);
//! the types here only carry the result and the caller-owned state around it.

use std::collections::VecDeque;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of notified alerts kept by [`AlertHistory`].
pub const ALERT_HISTORY_CAPACITY: usize = 10;

/// Thresholds and switches for margin alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginAlertSettings {
    /// Master switch; when false no alert is ever raised.
    pub enabled: bool,
    /// Margin percentage under which a trip is considered under-priced.
    pub min_margin_percent: Decimal,
    /// Alert on loss-making trips and negative margins.
    pub alert_on_negative_profit: bool,
    /// Alert on margins below `min_margin_percent`.
    pub alert_on_below_threshold: bool,
}

impl Default for MarginAlertSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            min_margin_percent: Decimal::new(10, 0),
            alert_on_negative_profit: true,
            alert_on_below_threshold: true,
        }
    }
}

/// Display severity of a margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Nothing to report.
    None,
    /// Margin is below the threshold but above half of it.
    Warning,
    /// Loss, negative margin, or margin below half the threshold.
    Critical,
}

/// Which rule raised an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// The trip loses money, or the margin is below half the threshold.
    Critical,
    /// The margin is below the threshold.
    BelowThreshold,
    /// The margin is negative while profit is not.
    Negative,
}

impl AlertKind {
    /// Severity to display for this kind of alert.
    pub fn severity(&self) -> Severity {
        match self {
            AlertKind::Critical | AlertKind::Negative => Severity::Critical,
            AlertKind::BelowThreshold => Severity::Warning,
        }
    }

    /// Returns the wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Critical => "critical",
            AlertKind::BelowThreshold => "below_threshold",
            AlertKind::Negative => "negative",
        }
    }
}

/// A margin alert for one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginAlert {
    /// The rule that fired.
    pub kind: AlertKind,
    /// Display severity.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// The margin that was evaluated, in percent.
    pub current_margin: Decimal,
    /// The threshold the margin was compared against.
    pub threshold: Decimal,
}

/// Deduplication key: an alert kind and the margin rounded to a whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertKey {
    /// The rule that fired.
    pub kind: AlertKind,
    /// The margin rounded half-up to an integer.
    pub rounded_margin: i64,
}

/// An alert that was shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    /// Identifier used to dismiss the alert.
    pub id: Uuid,
    /// The alert itself.
    pub alert: MarginAlert,
    /// Whether the user dismissed it.
    pub dismissed: bool,
}

/// Caller-owned list of the most recently notified alerts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertHistory {
    records: VecDeque<AlertRecord>,
}

impl AlertHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an alert, evicting the oldest beyond capacity. Returns its id.
    pub fn record(&mut self, alert: MarginAlert) -> Uuid {
        let id = Uuid::new_v4();
        if self.records.len() == ALERT_HISTORY_CAPACITY {
            self.records.pop_front();
        }
        self.records.push_back(AlertRecord {
            id,
            alert,
            dismissed: false,
        });
        id
    }

    /// Marks an alert as dismissed. Returns false if the id is unknown.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.dismissed = true;
                true
            }
            None => false,
        }
    }

    /// Alerts not yet dismissed, oldest first.
    pub fn active(&self) -> impl Iterator<Item = &AlertRecord> {
        self.records.iter().filter(|r| !r.dismissed)
    }

    /// All recorded alerts, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &AlertRecord> {
        self.records.iter()
    }

    /// Number of recorded alerts.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Removes every alert.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
