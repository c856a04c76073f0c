//! Address route handlers.
//!
//! Path IDs are parsed here; bodies arrive already validated through
//! [`ValidatedJson`].

pub mod types;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use address_registry_core::{AddressId, SessionId};

use crate::error::{AppError, Result};
use crate::middleware::ValidatedJson;
use crate::models::{Address, AddressChanges, NewAddress};
use crate::state::AppState;

pub use types::{CepAddressRequest, CreateAddressByCepDto, CreateAddressDto, UpdateAddressDto};

fn parse_address_id(raw: &str) -> Result<AddressId> {
    AddressId::parse(raw).map_err(|_| AppError::BadRequest("Invalid address ID format".to_string()))
}

fn parse_session_id(raw: &str) -> Result<SessionId> {
    SessionId::parse(raw).map_err(|_| AppError::BadRequest("Invalid session ID format".to_string()))
}

/// List every address, newest first.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Address>>> {
    Ok(Json(state.addresses().list_all().await?))
}

/// Show a single address.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Address>> {
    let id = parse_address_id(&id)?;
    Ok(Json(state.addresses().get(id).await?))
}

/// List the addresses of one session, newest first.
#[instrument(skip(state))]
pub async fn list_by_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<Address>>> {
    let session_id = parse_session_id(&session_id)?;
    Ok(Json(state.addresses().list_by_session(session_id).await?))
}

/// Create an address from explicit fields.
#[instrument(skip(state, dto))]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAddressDto>,
) -> Result<(StatusCode, Json<Address>)> {
    let created = state.addresses().create(NewAddress::try_from(dto)?).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Create an address by resolving a CEP.
#[instrument(skip(state, dto))]
pub async fn create_by_cep(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAddressByCepDto>,
) -> Result<(StatusCode, Json<Address>)> {
    let CepAddressRequest { session_id, cep } = dto.try_into()?;
    let created = state.addresses().create_by_cep(session_id, &cep).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partially update an address.
#[instrument(skip(state, dto))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateAddressDto>,
) -> Result<Json<Address>> {
    let id = parse_address_id(&id)?;
    let changes = AddressChanges::try_from(dto)?;
    Ok(Json(state.addresses().update(id, changes).await?))
}

/// Delete an address and return it.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Address>> {
    let id = parse_address_id(&id)?;
    Ok(Json(state.addresses().delete(id).await?))
}
