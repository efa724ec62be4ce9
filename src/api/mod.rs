//! REST API over the calculator.
//!
//! Provides three endpoints:
//! - `GET /constants` returns the server's parameter snapshot
//! - `POST /calculate` runs a scenario and returns the full result
//! - `POST /loan` quotes financing for a CAPEX amount

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::constants::Constants;
use crate::sim::ShapeKeywords;

pub use types::{CalculateRequest, ErrorResponse, LoanRequest};

/// Immutable application state shared across all request handlers.
///
/// Requests that omit constants or keywords fall back to these. Nothing
/// mutates the state after startup, so no locks are needed.
pub struct AppState {
    /// Parameter snapshot served by `/constants` and used by default.
    pub constants: Constants,
    /// Default coffee-shop keyword allowlist.
    pub keywords: ShapeKeywords,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/constants", get(handlers::get_constants))
        .route("/calculate", post(handlers::post_calculate))
        .route("/loan", post(handlers::post_loan))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an error if the listener cannot bind to `addr` or the server
/// fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
