//! Address orchestration.
//!
//! Combines the address store and the CEP directory, and turns storage or
//! lookup outcomes into [`AddressError`]. Uniqueness is never pre-checked:
//! the write is attempted and a `Conflict` from the store is reported as-is.

use thiserror::Error;
use tracing::{info, instrument};

use address_registry_core::{AddressId, PostalCode, SessionId};

use crate::cep::{CepError, CepLookup};
use crate::db::{AddressStore, RepositoryError};
use crate::models::{Address, AddressChanges, AddressFilter, NewAddress};

/// Message for a missing address.
pub const ADDRESS_NOT_FOUND: &str = "Address not found";
/// Message for a CEP the directory does not know.
pub const CEP_NOT_FOUND: &str = "CEP not found";
/// Message for a duplicate session + postal code.
pub const DUPLICATE_ADDRESS: &str = "Address with this session ID and postal code already exists";

/// Errors produced by address operations.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The address or CEP does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The session already has an address with this postal code.
    #[error("{0}")]
    Conflict(String),

    /// The CEP directory failed or answered with something unexpected.
    #[error(transparent)]
    Upstream(#[from] CepError),

    /// Any other storage failure.
    #[error("{0}")]
    Unclassified(String),
}

impl From<RepositoryError> for AddressError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => Self::NotFound(ADDRESS_NOT_FOUND.to_owned()),
            RepositoryError::Conflict(_) => Self::Conflict(DUPLICATE_ADDRESS.to_owned()),
            RepositoryError::Database(_) => Self::Unclassified(e.to_string()),
        }
    }
}

/// Address use cases over a store `S` and a CEP directory `L`.
#[derive(Debug, Clone)]
pub struct AddressService<S, L> {
    store: S,
    cep: L,
}

impl<S: AddressStore, L: CepLookup> AddressService<S, L> {
    /// Create a new address service.
    #[must_use]
    pub const fn new(store: S, cep: L) -> Self {
        Self { store, cep }
    }

    /// Get a reference to the address store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// All addresses, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::Unclassified` if the store fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Address>, AddressError> {
        Ok(self.store.find_many(&AddressFilter::default()).await?)
    }

    /// Addresses of one session, newest first. Unknown sessions yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::Unclassified` if the store fails.
    #[instrument(skip(self, session_id), fields(session_id = %session_id))]
    pub async fn list_by_session(&self, session_id: SessionId) -> Result<Vec<Address>, AddressError> {
        Ok(self
            .store
            .find_many(&AddressFilter::session(session_id))
            .await?)
    }

    /// A single address.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::NotFound` if no address has this ID.
    #[instrument(skip(self, id), fields(address_id = %id))]
    pub async fn get(&self, id: AddressId) -> Result<Address, AddressError> {
        self.store
            .find_unique(id)
            .await?
            .ok_or_else(|| AddressError::NotFound(ADDRESS_NOT_FOUND.to_owned()))
    }

    /// Create an address from explicit fields.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::Conflict` if the session already has this postal code.
    #[instrument(skip(self, address), fields(session_id = %address.session_id))]
    pub async fn create(&self, address: NewAddress) -> Result<Address, AddressError> {
        let created = self.store.create(&address).await?;
        info!(address_id = %created.id, "Address created");
        Ok(created)
    }

    /// Create an address by resolving `cep` through the CEP directory.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::NotFound` if the directory does not know the CEP,
    /// `AddressError::Upstream` if the lookup fails, and
    /// `AddressError::Conflict` if the session already has this postal code.
    #[instrument(skip(self, session_id, cep), fields(session_id = %session_id, cep = %cep))]
    pub async fn create_by_cep(
        &self,
        session_id: SessionId,
        cep: &PostalCode,
    ) -> Result<Address, AddressError> {
        let resolved = self
            .cep
            .lookup(cep)
            .await?
            .ok_or_else(|| AddressError::NotFound(CEP_NOT_FOUND.to_owned()))?;

        let address = NewAddress {
            session_id,
            street: resolved.street,
            postal_code: resolved.postal_code,
            city: resolved.city,
            state: resolved.state,
            country: resolved.country,
        };

        let created = self.store.create(&address).await?;
        info!(address_id = %created.id, "Address created from CEP");
        Ok(created)
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::NotFound` if no address has this ID and
    /// `AddressError::Conflict` if the change collides with another address.
    #[instrument(skip(self, id, changes), fields(address_id = %id, empty = changes.is_empty()))]
    pub async fn update(
        &self,
        id: AddressId,
        changes: AddressChanges,
    ) -> Result<Address, AddressError> {
        let updated = self.store.update(id, &changes).await?;
        info!("Address updated");
        Ok(updated)
    }

    /// Delete an address and return it.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::NotFound` if no address has this ID.
    #[instrument(skip(self, id), fields(address_id = %id))]
    pub async fn delete(&self, id: AddressId) -> Result<Address, AddressError> {
        let deleted = self.store.delete(id).await?;
        info!("Address deleted");
        Ok(deleted)
    }
}
