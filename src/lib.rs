//! Haulage pricing engine.
//!
//! Costs a road-freight trip (fuel, AdBlue, tolls, drivers, structure charges
//! and fleet ownership), recommends a price, measures profitability under the
//! chosen pricing mode and raises margin alerts. The calculation core is pure
//! and infallible; configuration loading and the HTTP API sit around it.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
