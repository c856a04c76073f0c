//! Address repository for database operations.
//!
//! Queries are checked at runtime (`query_as` + `FromRow`) so the crate
//! builds without a live database.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use address_registry_core::{AddressId, SessionId};

use super::{AddressStore, RepositoryError};
use crate::models::{Address, AddressChanges, AddressFilter, NewAddress};

const ADDRESS_COLUMNS: &str =
    "id, session_id, street, postal_code, city, state, country, created_at, updated_at";

/// Row shape returned by every address query.
#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: Uuid,
    session_id: Uuid,
    street: String,
    postal_code: String,
    city: String,
    state: String,
    country: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AddressRow> for Address {
    fn from(r: AddressRow) -> Self {
        Self {
            id: AddressId::new(r.id),
            session_id: SessionId::new(r.session_id),
            street: r.street,
            postal_code: r.postal_code,
            city: r.city,
            state: r.state,
            country: r.country,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Repository for address database operations.
#[derive(Debug, Clone)]
pub struct AddressRepository {
    pool: PgPool,
}

impl AddressRepository {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Classify write failures: unique violations become `Conflict`.
fn map_write_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("session and postal code already exist".to_owned());
    }
    RepositoryError::Database(e)
}

impl AddressStore for AddressRepository {
    /// List addresses, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_many(&self, filter: &AddressFilter) -> Result<Vec<Address>, RepositoryError> {
        let rows = sqlx::query_as::<_, AddressRow>(&format!(
            r"
            SELECT {ADDRESS_COLUMNS}
            FROM address
            WHERE ($1::uuid IS NULL OR session_id = $1)
            ORDER BY created_at DESC
            "
        ))
        .bind(filter.session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Address::from).collect())
    }

    /// Get an address by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_unique(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(&format!(
            r"
            SELECT {ADDRESS_COLUMNS}
            FROM address
            WHERE id = $1
            "
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Address::from))
    }

    /// Insert a new address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the session already has this postal code.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn create(&self, address: &NewAddress) -> Result<Address, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(&format!(
            r"
            INSERT INTO address (session_id, street, postal_code, city, state, country)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ADDRESS_COLUMNS}
            "
        ))
        .bind(address.session_id)
        .bind(&address.street)
        .bind(&address.postal_code)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.country)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    /// Update the given fields of an address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address doesn't exist.
    /// Returns `RepositoryError::Conflict` if the change collides with another address.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn update(
        &self,
        id: AddressId,
        changes: &AddressChanges,
    ) -> Result<Address, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(&format!(
            r"
            UPDATE address
            SET session_id  = COALESCE($2, session_id),
                street      = COALESCE($3, street),
                postal_code = COALESCE($4, postal_code),
                city        = COALESCE($5, city),
                state       = COALESCE($6, state),
                country     = COALESCE($7, country),
                updated_at  = now()
            WHERE id = $1
            RETURNING {ADDRESS_COLUMNS}
            "
        ))
        .bind(id)
        .bind(changes.session_id)
        .bind(changes.street.as_deref())
        .bind(changes.postal_code.as_deref())
        .bind(changes.city.as_deref())
        .bind(changes.state.as_deref())
        .bind(changes.country.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        row.map(Address::from).ok_or(RepositoryError::NotFound)
    }

    /// Delete an address and return it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn delete(&self, id: AddressId) -> Result<Address, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(&format!(
            r"
            DELETE FROM address
            WHERE id = $1
            RETURNING {ADDRESS_COLUMNS}
            "
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Address::from).ok_or(RepositoryError::NotFound)
    }
}
