//! Integration tests for the address registry.
//!
//! # Running Tests
//!
//! ```bash
//! # Apply migrations and start the server
//! cargo run -p address-registry-cli -- migrate
//! cargo run -p address-registry-server
//!
//! # Run the ignored integration tests
//! cargo test -p address-registry-integration-tests -- --ignored
//! ```
//!
//! `ADDRESS_BASE_URL` overrides the server location (default
//! `http://localhost:3000`). CEP tests also need ViaCEP to be reachable.

use reqwest::Client;
use serde_json::{Value, json};

use address_registry_core::SessionId;

/// Base URL of the running server.
#[must_use]
pub fn base_url() -> String {
    std::env::var("ADDRESS_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// URL of an address API route, e.g. `api_url("/address")`.
#[must_use]
pub fn api_url(path: &str) -> String {
    format!("{}/api/v1{path}", base_url())
}

/// Plain HTTP client for the API.
#[must_use]
pub fn client() -> Client {
    Client::new()
}

/// A fresh session, so tests never collide on `(sessionId, postalCode)`.
#[must_use]
pub fn new_session() -> SessionId {
    SessionId::generate()
}

/// Create body with the given session and postal code.
#[must_use]
pub fn address_body(session_id: SessionId, postal_code: &str) -> Value {
    json!({
        "sessionId": session_id.to_string(),
        "street": "123 Main St",
        "postalCode": postal_code,
        "city": "Springfield",
        "state": "IL",
        "country": "USA"
    })
}
