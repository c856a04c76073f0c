//! ViaCEP wire types.

use serde::Deserialize;

use crate::models::CEP_COUNTRY;

/// Body of `GET /ws/{cep}/json/`.
///
/// Unknown CEPs come back as `{"erro": true}` (older deployments send the
/// string `"true"`), so every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViaCepResponse {
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default)]
    pub logradouro: Option<String>,
    #[serde(default)]
    pub localidade: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub erro: Option<serde_json::Value>,
}

/// Address fields resolved from a CEP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl ViaCepResponse {
    /// Whether the directory flagged the CEP as unknown.
    #[must_use]
    pub fn is_error(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
            Some(serde_json::Value::Null) | None => false,
            Some(_) => true,
        }
    }

    /// Map the response to address fields.
    ///
    /// Returns `None` for error-flagged or empty responses.
    #[must_use]
    pub fn into_resolved(self) -> Option<ResolvedAddress> {
        if self.is_error() {
            return None;
        }

        let Self {
            cep: Some(postal_code),
            logradouro,
            localidade,
            uf,
            ..
        } = self
        else {
            return None;
        };

        Some(ResolvedAddress {
            street: logradouro.unwrap_or_default(),
            postal_code,
            city: localidade.unwrap_or_default(),
            state: uf.unwrap_or_default(),
            country: CEP_COUNTRY.to_string(),
        })
    }
}
