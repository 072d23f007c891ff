//! HTTP request handlers for the pricing engine API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    QuoteInput, VehicleCostParams, alert_severity, calculate_quote, calculate_trailer_costs,
    calculate_vehicle_costs, check_margin, evaluate_margin, fleet_unit_for_trailer,
    fleet_unit_for_vehicle, rate_cost_per_km, to_ht,
};
use crate::models::{AppSettings, VehicleParams};

use super::request::{MarginAlertRequest, QuoteRequest, TrailerCostRequest, VehicleCostRequest};
use super::response::{
    ApiError, ApiErrorResponse, MarginAlertResponse, QuoteResponse, TrailerCostResponse,
    VehicleCostResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/quote", post(quote_handler))
        .route("/margin-alert", post(margin_alert_handler))
        .route("/fleet/vehicle-cost", post(vehicle_cost_handler))
        .route("/fleet/trailer-cost", post(trailer_cost_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Turns a body extraction failure into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    error_response(ApiErrorResponse::bad_request(error))
}

fn cost_params(
    params: &VehicleParams,
    settings: &AppSettings,
    estimated_annual_km: Option<Decimal>,
    reference_year: Option<i32>,
) -> VehicleCostParams {
    VehicleCostParams {
        fuel_price_ht: to_ht(params.fuel_price, settings.tva_rate, params.fuel_price_is_ht),
        ad_blue_price_ht: to_ht(
            params.ad_blue_price,
            settings.tva_rate,
            params.ad_blue_price_is_ht,
        ),
        estimated_annual_km,
        reference_year: reference_year.unwrap_or_else(|| Utc::now().year()),
    }
}

/// Handler for POST /quote.
async fn quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quote request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = request.validate() {
        warn!(correlation_id = %correlation_id, error = %err, "Quote request rejected");
        return error_response(err.into());
    }

    let start_time = Instant::now();
    let config = state.config();
    let settings = request
        .settings
        .unwrap_or_else(|| config.settings().clone());
    let vehicle_params = request
        .vehicle_params
        .unwrap_or_else(|| config.vehicle_params().clone());
    let params = cost_params(
        &vehicle_params,
        &settings,
        request.estimated_annual_km,
        request.reference_year,
    );

    let input = QuoteInput {
        vehicles: request
            .vehicles
            .iter()
            .map(|v| fleet_unit_for_vehicle(v, &params))
            .collect(),
        trailer: request
            .trailer
            .as_ref()
            .map(|t| fleet_unit_for_trailer(t, &params)),
        trip: request.trip,
        vehicle_params,
        drivers: request.drivers,
        charges: request.charges,
    };

    let quote = calculate_quote(&input, &settings);
    let breakdown = &quote.breakdown;
    let margin_alert = evaluate_margin(
        breakdown.profit,
        breakdown.profit_margin,
        config.margin_alerts(),
    );
    let severity = alert_severity(breakdown.profit_margin, config.margin_alerts());

    info!(
        correlation_id = %correlation_id,
        pricing_mode = input.trip.pricing_mode.as_str(),
        vehicles = input.vehicles.len(),
        drivers = input.drivers.len(),
        total_cost = %breakdown.total_cost,
        revenue = %breakdown.revenue,
        profit_margin = %breakdown.profit_margin,
        duration_us = start_time.elapsed().as_micros() as u64,
        "Quote completed successfully"
    );
    if let Some(alert) = &margin_alert {
        warn!(
            correlation_id = %correlation_id,
            kind = alert.kind.as_str(),
            message = %alert.message,
            "Margin alert raised"
        );
    }

    json_response(
        StatusCode::OK,
        QuoteResponse {
            quote_id: Uuid::new_v4(),
            calculated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            breakdown: quote.breakdown,
            audit_trace: quote.audit_trace,
            margin_alert,
            severity,
        },
    )
}

/// Handler for POST /margin-alert.
async fn margin_alert_handler(
    State(state): State<AppState>,
    payload: Result<Json<MarginAlertRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let settings = state.config().margin_alerts();
    let check = check_margin(
        request.profit,
        request.margin,
        settings,
        request.last_key.as_ref(),
    );
    let severity = alert_severity(request.margin, settings);

    info!(
        correlation_id = %correlation_id,
        alert = check.alert.as_ref().map(|a| a.kind.as_str()),
        notify = check.notify,
        "Margin evaluated"
    );

    json_response(StatusCode::OK, MarginAlertResponse { check, severity })
}

/// Handler for POST /fleet/vehicle-cost.
async fn vehicle_cost_handler(
    State(state): State<AppState>,
    payload: Result<Json<VehicleCostRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = request.validate() {
        warn!(correlation_id = %correlation_id, error = %err, "Vehicle cost request rejected");
        return error_response(err.into());
    }

    let config = state.config();
    let vehicle_params = request
        .vehicle_params
        .unwrap_or_else(|| config.vehicle_params().clone());
    let params = cost_params(
        &vehicle_params,
        config.settings(),
        request.estimated_annual_km,
        request.reference_year,
    );
    let costs = calculate_vehicle_costs(&request.vehicle, &params);
    let rating = rate_cost_per_km(costs.total_cost_per_km);

    info!(
        correlation_id = %correlation_id,
        vehicle_id = %request.vehicle.id,
        total_annual_fixed_cost = %costs.total_annual_fixed_cost,
        total_cost_per_km = %costs.total_cost_per_km,
        "Vehicle costed"
    );

    json_response(
        StatusCode::OK,
        VehicleCostResponse {
            vehicle_id: request.vehicle.id,
            costs,
            rating,
        },
    )
}

/// Handler for POST /fleet/trailer-cost.
async fn trailer_cost_handler(
    State(state): State<AppState>,
    payload: Result<Json<TrailerCostRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = request.validate() {
        warn!(correlation_id = %correlation_id, error = %err, "Trailer cost request rejected");
        return error_response(err.into());
    }

    let config = state.config();
    let params = cost_params(
        config.vehicle_params(),
        config.settings(),
        request.estimated_annual_km,
        request.reference_year,
    );
    let costs = calculate_trailer_costs(&request.trailer, &params);

    info!(
        correlation_id = %correlation_id,
        trailer_id = %request.trailer.id,
        total_annual_fixed_cost = %costs.total_annual_fixed_cost,
        "Trailer costed"
    );

    json_response(
        StatusCode::OK,
        TrailerCostResponse {
            trailer_id: request.trailer.id,
            costs,
        },
    )
}
