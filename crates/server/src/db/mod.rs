//! Database operations for the address `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `address` - Session-scoped postal addresses, unique on
//!   `(session_id, postal_code)`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p address-registry-cli -- migrate
//! ```

pub mod addresses;

use std::future::Future;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use address_registry_core::AddressId;

use crate::models::{Address, AddressChanges, AddressFilter, NewAddress};

pub use addresses::AddressRepository;

/// Errors that can occur during repository operations.
///
/// Storage outcomes other than success are classified here, so callers never
/// inspect raw driver error codes.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (unique session + postal code).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Persistence port for addresses.
///
/// Every method is a single round-trip with no business logic.
pub trait AddressStore: Send + Sync {
    /// Addresses matching `filter`, newest first.
    fn find_many(
        &self,
        filter: &AddressFilter,
    ) -> impl Future<Output = Result<Vec<Address>, RepositoryError>> + Send;

    /// The address with `id`, or `None` if absent.
    fn find_unique(
        &self,
        id: AddressId,
    ) -> impl Future<Output = Result<Option<Address>, RepositoryError>> + Send;

    /// Insert an address. Fails with `Conflict` on a duplicate session + postal code.
    fn create(
        &self,
        address: &NewAddress,
    ) -> impl Future<Output = Result<Address, RepositoryError>> + Send;

    /// Apply `changes` and refresh `updated_at`.
    /// Fails with `NotFound` or `Conflict`.
    fn update(
        &self,
        id: AddressId,
        changes: &AddressChanges,
    ) -> impl Future<Output = Result<Address, RepositoryError>> + Send;

    /// Delete and return the address. Fails with `NotFound`.
    fn delete(&self, id: AddressId)
    -> impl Future<Output = Result<Address, RepositoryError>> + Send;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
