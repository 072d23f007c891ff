//! HTTP API for the haulage pricing engine.
//!
//! Exposes trip quotes, margin alert evaluation and fleet cost breakdowns as
//! JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{MarginAlertRequest, QuoteRequest, TrailerCostRequest, VehicleCostRequest};
pub use response::{
    ApiError, ApiErrorResponse, MarginAlertResponse, QuoteResponse, TrailerCostResponse,
    VehicleCostResponse,
};
pub use state::AppState;
