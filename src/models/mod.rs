//! Core data models for the haulage pricing engine.
//!
//! Every model is an immutable value supplied per call; the engine never
//! mutates or retains them.

mod alert;
mod charge;
mod driver;
mod fleet;
mod quote;
mod settings;
mod trip;

pub use alert::{
    ALERT_HISTORY_CAPACITY, AlertHistory, AlertKey, AlertKind, AlertRecord, MarginAlert,
    MarginAlertSettings, Severity,
};
pub use charge::{ChargeCategory, FixedCharge, Periodicity};
pub use driver::{
    Driver, DriverContract, InterimTerms, SalariedTerms, default_interim_coefficient,
    default_interim_hours_per_day,
};
pub use fleet::{
    DepreciationMethod, DepreciationTerms, FleetUnit, Maintenance, TireSet, Trailer, Vehicle,
    VehicleParams,
};
pub use quote::{AuditStep, AuditTrace, AuditWarning, CostBreakdown, TripQuote};
pub use settings::AppSettings;
pub use trip::{PricingMode, TripCalculation};
