//! ViaCEP HTTP client.

use reqwest::Client;
use tracing::{debug, instrument, warn};

use address_registry_core::PostalCode;

use super::error::CepError;
use super::types::{ResolvedAddress, ViaCepResponse};
use super::CepLookup;
use crate::config::ViaCepConfig;

/// Client for the ViaCEP postal-code directory.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    /// HTTP client.
    client: Client,
    /// Base URL without trailing slash, e.g. `https://viacep.com.br/ws`.
    base_url: String,
}

impl ViaCepClient {
    /// Create a new ViaCEP client.
    #[must_use]
    pub fn new(config: &ViaCepConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Lookup URL for `cep`.
    #[must_use]
    pub fn lookup_url(&self, cep: &PostalCode) -> String {
        format!("{}/{}/json/", self.base_url, cep.digits())
    }
}

impl CepLookup for ViaCepClient {
    /// Resolve `cep` to address fields.
    ///
    /// # Errors
    ///
    /// Returns `CepError` if the request fails, the directory answers with a
    /// non-success status, or the body is not the expected JSON.
    #[instrument(skip(self, cep), fields(cep = %cep))]
    async fn lookup(&self, cep: &PostalCode) -> Result<Option<ResolvedAddress>, CepError> {
        let response = self
            .client
            .get(self.lookup_url(cep))
            .send()
            .await
            .map_err(|e| CepError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "CEP directory returned an error status");
            return Err(CepError::Status {
                status: status.as_u16(),
            });
        }

        let body: ViaCepResponse = response
            .json()
            .await
            .map_err(|e| CepError::Response(e.to_string()))?;

        let resolved = body.into_resolved();
        debug!(found = resolved.is_some(), "CEP lookup finished");
        Ok(resolved)
    }
}
