//! Address registry server library.
//!
//! Session-scoped postal addresses over HTTP, with creation from a Brazilian
//! CEP resolved through ViaCEP. Exposed as a library so the router can be
//! exercised in tests without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cep;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use std::time::Duration;

use axum::http::{HeaderValue, Request, Response};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the application router with the request-scoped layers.
///
/// Sentry layers are added by the binary so tests run without a hub.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(state.config());

    routes::routes()
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
        .layer(cors)
        .with_state(state)
}

/// CORS policy: any origin unless `CORS_ALLOWED_ORIGINS` narrows it.
#[must_use]
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origin = match &config.cors_allowed_origins {
        Some(origins) => AllowOrigin::list(
            origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        ),
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
