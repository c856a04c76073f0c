//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                - Liveness check
//! GET    /health/ready                          - Readiness check (database)
//!
//! # Addresses (prefixed with /api/v1)
//! GET    /api/v1/address                        - List all addresses
//! GET    /api/v1/address/{id}                   - Address detail
//! GET    /api/v1/address/session/{sessionId}    - Addresses of one session
//! POST   /api/v1/create-address                 - Create from explicit fields
//! POST   /api/v1/create-address-by-cep          - Create from a CEP lookup
//! PATCH  /api/v1/update-address/{id}            - Partial update
//! DELETE /api/v1/delete-address/{id}            - Delete, returns the record
//! ```

pub mod addresses;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Global prefix for the address API.
pub const API_PREFIX: &str = "/api/v1";

/// Create the address API router (mounted under [`API_PREFIX`]).
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/address", get(addresses::list))
        .route("/address/{id}", get(addresses::show))
        .route("/address/session/{session_id}", get(addresses::list_by_session))
        .route("/create-address", post(addresses::create))
        .route("/create-address-by-cep", post(addresses::create_by_cep))
        .route("/update-address/{id}", patch(addresses::update))
        .route("/delete-address/{id}", delete(addresses::delete))
}

/// Create the main router with all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest(API_PREFIX, address_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
