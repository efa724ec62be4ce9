//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use tracing::warn;

use super::AppState;
use super::types::{CalculateRequest, ErrorResponse, LoanRequest};
use crate::constants::Constants;
use crate::error::Error;
use crate::finance::LoanQuote;
use crate::runner::{CalculationResult, run_calculation};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

fn bad_request(error: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    let error = error.into();
    warn!(%error, "rejected request");
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

/// Returns the server's constants snapshot.
///
/// `GET /constants` → 200 + `Constants` JSON
pub async fn get_constants(State(state): State<Arc<AppState>>) -> Json<Constants> {
    Json(state.constants.clone())
}

/// Runs a full calculation.
///
/// `POST /calculate` → 200 + `CalculationResult` JSON
/// malformed or invalid scenario → 400 + `ErrorResponse`
pub async fn post_calculate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CalculateRequest>, JsonRejection>,
) -> ApiResult<CalculationResult> {
    let Json(request) = body.map_err(|e| bad_request(e.body_text()))?;
    let scenario = request.into_scenario(&state.constants, &state.keywords);
    run_calculation(&scenario)
        .map(Json)
        .map_err(|e: Error| bad_request(e.to_string()))
}

/// Quotes bank financing for a CAPEX amount.
///
/// `POST /loan` → 200 + `LoanQuote` JSON
/// negative CAPEX or invalid terms → 400 + `ErrorResponse`
pub async fn post_loan(body: Result<Json<LoanRequest>, JsonRejection>) -> ApiResult<LoanQuote> {
    let Json(request) = body.map_err(|e| bad_request(e.body_text()))?;
    if !request.capex.is_finite() || request.capex < 0.0 {
        return Err(bad_request("capex must be >= 0"));
    }
    let errors = request.terms.validate();
    if !errors.is_empty() {
        return Err(bad_request(Error::Config(errors).to_string()));
    }
    Ok(Json(request.terms.quote(request.capex)))
}
