//! Brazilian postal-code (CEP) resolution.
//!
//! Resolves a CEP to street, city and state through the public ViaCEP
//! directory (`GET {base}/{cep}/json/`). Country is always `Brazil`.
//!
//! No retries and no timeout beyond the `reqwest` defaults.

mod client;
mod error;
mod types;

use std::future::Future;

use address_registry_core::PostalCode;

pub use client::ViaCepClient;
pub use error::CepError;
pub use types::{ResolvedAddress, ViaCepResponse};

/// Postal-code directory port.
pub trait CepLookup: Send + Sync {
    /// Resolve `cep`. `Ok(None)` means the directory does not know it.
    fn lookup(
        &self,
        cep: &PostalCode,
    ) -> impl Future<Output = Result<Option<ResolvedAddress>, CepError>> + Send;
}
