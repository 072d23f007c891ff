//! Configuration loading for the haulage pricing engine.
//!
//! A configuration directory holds the application settings, the default
//! vehicle parameters and the margin alert thresholds as YAML files.
//!
//! # Example
//!
//! ```no_run
//! use haulage_pricing::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Working days per year: {}", config.settings().working_days_per_year);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, SettingsFile};
