//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::cep::ViaCepClient;
use crate::config::ServerConfig;
use crate::db::AddressRepository;
use crate::services::AddressService;

/// Address service wired to `PostgreSQL` and ViaCEP.
pub type Addresses = AddressService<AddressRepository, ViaCepClient>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    addresses: Addresses,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let cep = ViaCepClient::new(&config.viacep);
        let addresses = AddressService::new(AddressRepository::new(pool), cep);

        Self {
            inner: Arc::new(AppStateInner { config, addresses }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        self.inner.addresses.store().pool()
    }

    /// Get a reference to the address service.
    #[must_use]
    pub fn addresses(&self) -> &Addresses {
        &self.inner.addresses
    }
}
