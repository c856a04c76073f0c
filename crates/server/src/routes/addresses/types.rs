//! Request bodies for the address routes.
//!
//! Required string fields default to `""` when absent so they fail their
//! field rule instead of the JSON parser.

use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError};

use address_registry_core::{PostalCode, SessionId};

use crate::error::{AppError, FieldError};
use crate::models::{AddressChanges, NewAddress};

const SESSION_ID_MESSAGE: &str = "sessionId must be a UUID";
const POSTAL_CODE_MESSAGE: &str = "Invalid postal code format";
const CEP_MESSAGE: &str = "Invalid CEP format";

fn validate_session_id(value: &str) -> Result<(), ValidationError> {
    SessionId::parse(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("uuid").with_message(Cow::Borrowed(SESSION_ID_MESSAGE)))
}

/// Postal code, hyphen optional, ASCII digits only.
fn validate_postal_code(value: &str) -> Result<(), ValidationError> {
    PostalCode::parse(value).map(|_| ()).map_err(|_| {
        ValidationError::new("postal_code").with_message(Cow::Borrowed(POSTAL_CODE_MESSAGE))
    })
}

/// CEP in the canonical `NNNNN-NNN` form.
fn validate_cep(value: &str) -> Result<(), ValidationError> {
    PostalCode::parse_cep(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("cep").with_message(Cow::Borrowed(CEP_MESSAGE)))
}

fn invalid_field(field: &str, message: &str) -> AppError {
    AppError::Validation(vec![FieldError {
        field: field.to_string(),
        messages: vec![message.to_string()],
    }])
}

fn session_id(raw: &str) -> Result<SessionId, AppError> {
    SessionId::parse(raw).map_err(|_| invalid_field("sessionId", SESSION_ID_MESSAGE))
}

/// Body of `POST /create-address`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAddressDto {
    #[validate(custom(function = "validate_session_id"))]
    pub session_id: String,
    #[validate(length(min = 1, message = "street is required"))]
    pub street: String,
    #[validate(custom(function = "validate_postal_code"))]
    pub postal_code: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "state is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "country is required"))]
    pub country: String,
}

impl TryFrom<CreateAddressDto> for NewAddress {
    type Error = AppError;

    fn try_from(dto: CreateAddressDto) -> Result<Self, Self::Error> {
        let session_id = session_id(&dto.session_id)?;
        PostalCode::parse(&dto.postal_code)
            .map_err(|_| invalid_field("postalCode", POSTAL_CODE_MESSAGE))?;

        Ok(Self {
            session_id,
            street: dto.street,
            postal_code: dto.postal_code,
            city: dto.city,
            state: dto.state,
            country: dto.country,
        })
    }
}

/// Body of `POST /create-address-by-cep`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAddressByCepDto {
    #[validate(custom(function = "validate_session_id"))]
    pub session_id: String,
    #[validate(custom(function = "validate_cep"))]
    pub cep: String,
}

/// Parsed CEP creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CepAddressRequest {
    pub session_id: SessionId,
    pub cep: PostalCode,
}

impl TryFrom<CreateAddressByCepDto> for CepAddressRequest {
    type Error = AppError;

    fn try_from(dto: CreateAddressByCepDto) -> Result<Self, Self::Error> {
        Ok(Self {
            session_id: session_id(&dto.session_id)?,
            cep: PostalCode::parse_cep(&dto.cep).map_err(|_| invalid_field("cep", CEP_MESSAGE))?,
        })
    }
}

/// Body of `PATCH /update-address/{id}`. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateAddressDto {
    #[validate(custom(function = "validate_session_id"))]
    pub session_id: Option<String>,
    #[validate(length(min = 1, message = "street is required"))]
    pub street: Option<String>,
    #[validate(custom(function = "validate_postal_code"))]
    pub postal_code: Option<String>,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: Option<String>,
    #[validate(length(min = 1, message = "state is required"))]
    pub state: Option<String>,
    #[validate(length(min = 1, message = "country is required"))]
    pub country: Option<String>,
}

impl TryFrom<UpdateAddressDto> for AddressChanges {
    type Error = AppError;

    fn try_from(dto: UpdateAddressDto) -> Result<Self, Self::Error> {
        let session_id = dto.session_id.as_deref().map(session_id).transpose()?;
        if let Some(postal_code) = dto.postal_code.as_deref() {
            PostalCode::parse(postal_code)
                .map_err(|_| invalid_field("postalCode", POSTAL_CODE_MESSAGE))?;
        }

        Ok(Self {
            session_id,
            street: dto.street,
            postal_code: dto.postal_code,
            city: dto.city,
            state: dto.state,
            country: dto.country,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use validator::ValidationErrors;

    use super::*;

    const SESSION: &str = "6f1c1b1e-2a53-4c8e-9a55-0d3c0f7b9e21";

    /// Arabic-Indic and fullwidth digits, which are numeric but not ASCII.
    const NON_ASCII_CODES: [&str; 3] = ["١٢٣٤٥-٦٧٨", "１２３４５-６７８", "12345-６７８"];

    fn messages(errors: &ValidationErrors, field: &str) -> Vec<String> {
        errors.field_errors()[field]
            .iter()
            .filter_map(|e| e.message.as_ref().map(ToString::to_string))
            .collect()
    }

    fn single_field(err: AppError) -> FieldError {
        match err {
            AppError::Validation(mut fields) => {
                assert_eq!(fields.len(), 1);
                fields.remove(0)
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    fn valid_create() -> CreateAddressDto {
        serde_json::from_value(serde_json::json!({
            "sessionId": SESSION,
            "street": "123 Main St",
            "postalCode": "12345-678",
            "city": "Springfield",
            "state": "IL",
            "country": "USA"
        }))
        .unwrap()
    }

    #[test]
    fn test_create_valid() {
        let dto = valid_create();
        assert!(dto.validate().is_ok());

        let address = NewAddress::try_from(dto).unwrap();
        assert_eq!(address.session_id.to_string(), SESSION);
        assert_eq!(address.postal_code, "12345-678");
    }

    #[test]
    fn test_create_accepts_unhyphenated_postal_code() {
        let dto = CreateAddressDto {
            postal_code: "12345678".to_string(),
            ..valid_create()
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_missing_fields_are_required() {
        let dto: CreateAddressDto = serde_json::from_str("{}").unwrap();
        let errors = dto.validate().unwrap_err();

        assert_eq!(messages(&errors, "session_id"), ["sessionId must be a UUID"]);
        assert_eq!(messages(&errors, "street"), ["street is required"]);
        assert_eq!(messages(&errors, "postal_code"), ["Invalid postal code format"]);
        assert_eq!(messages(&errors, "city"), ["city is required"]);
        assert_eq!(messages(&errors, "state"), ["state is required"]);
        assert_eq!(messages(&errors, "country"), ["country is required"]);
    }

    #[test]
    fn test_create_rejects_bad_postal_code() {
        for bad in ["1234-5678", "abcde-fgh", "123456789", "12345_678"] {
            let dto = CreateAddressDto {
                postal_code: bad.to_string(),
                ..valid_create()
            };
            assert!(dto.validate().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_create_rejects_non_ascii_digits() {
        for bad in NON_ASCII_CODES {
            let dto = CreateAddressDto {
                postal_code: bad.to_string(),
                ..valid_create()
            };
            let errors = dto.clone().validate().unwrap_err();
            assert_eq!(messages(&errors, "postal_code"), ["Invalid postal code format"]);

            let field = single_field(NewAddress::try_from(dto).unwrap_err());
            assert_eq!(field.field, "postalCode");
        }
    }

    #[test]
    fn test_create_rejects_non_uuid_session() {
        let dto = CreateAddressDto {
            session_id: "session-1".to_string(),
            ..valid_create()
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(messages(&errors, "session_id"), ["sessionId must be a UUID"]);
    }

    #[test]
    fn test_create_conversion_reports_session_field() {
        let dto = CreateAddressDto {
            session_id: "session-1".to_string(),
            ..valid_create()
        };

        let field = single_field(NewAddress::try_from(dto).unwrap_err());

        assert_eq!(field.field, "sessionId");
        assert_eq!(field.messages, ["sessionId must be a UUID"]);
    }

    #[test]
    fn test_cep_requires_hyphen() {
        let dto = CreateAddressByCepDto {
            session_id: SESSION.to_string(),
            cep: "01001000".to_string(),
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(messages(&errors, "cep"), ["Invalid CEP format"]);
    }

    #[test]
    fn test_cep_rejects_non_ascii_digits() {
        for bad in NON_ASCII_CODES {
            let dto = CreateAddressByCepDto {
                session_id: SESSION.to_string(),
                cep: bad.to_string(),
            };
            let errors = dto.clone().validate().unwrap_err();
            assert_eq!(messages(&errors, "cep"), ["Invalid CEP format"]);

            let field = single_field(CepAddressRequest::try_from(dto).unwrap_err());
            assert_eq!(field.field, "cep");
            assert_eq!(field.messages, ["Invalid CEP format"]);
        }
    }

    #[test]
    fn test_cep_valid_request() {
        let dto = CreateAddressByCepDto {
            session_id: SESSION.to_string(),
            cep: "01001-000".to_string(),
        };
        assert!(dto.validate().is_ok());

        let request = CepAddressRequest::try_from(dto).unwrap();
        assert_eq!(request.session_id.to_string(), SESSION);
        assert_eq!(request.cep.as_str(), "01001-000");
    }

    #[test]
    fn test_cep_conversion_reports_session_field() {
        let dto = CreateAddressByCepDto {
            session_id: String::new(),
            cep: "01001-000".to_string(),
        };

        let field = single_field(CepAddressRequest::try_from(dto).unwrap_err());

        assert_eq!(field.field, "sessionId");
    }

    #[test]
    fn test_update_empty_body_is_valid() {
        let dto: UpdateAddressDto = serde_json::from_str("{}").unwrap();
        assert!(dto.validate().is_ok());
        assert!(AddressChanges::try_from(dto).unwrap().is_empty());
    }

    #[test]
    fn test_update_present_fields_follow_create_rules() {
        let dto: UpdateAddressDto =
            serde_json::from_str(r#"{"street": "", "postalCode": "nope"}"#).unwrap();
        let errors = dto.validate().unwrap_err();

        assert_eq!(messages(&errors, "street"), ["street is required"]);
        assert_eq!(messages(&errors, "postal_code"), ["Invalid postal code format"]);
    }

    #[test]
    fn test_update_rejects_non_ascii_digits() {
        for bad in NON_ASCII_CODES {
            let dto = UpdateAddressDto {
                postal_code: Some(bad.to_string()),
                ..UpdateAddressDto::default()
            };
            let errors = dto.clone().validate().unwrap_err();
            assert_eq!(messages(&errors, "postal_code"), ["Invalid postal code format"]);

            let field = single_field(AddressChanges::try_from(dto).unwrap_err());
            assert_eq!(field.field, "postalCode");
        }
    }

    #[test]
    fn test_update_conversion_reports_session_field() {
        let dto = UpdateAddressDto {
            session_id: Some("not-a-uuid".to_string()),
            ..UpdateAddressDto::default()
        };

        let field = single_field(AddressChanges::try_from(dto).unwrap_err());

        assert_eq!(field.field, "sessionId");
        assert_eq!(field.messages, ["sessionId must be a UUID"]);
    }

    #[test]
    fn test_update_into_changes() {
        let dto: UpdateAddressDto =
            serde_json::from_str(&format!(r#"{{"sessionId": "{SESSION}", "city": "Shelbyville"}}"#))
                .unwrap();
        let changes = AddressChanges::try_from(dto).unwrap();

        assert_eq!(changes.session_id.unwrap().to_string(), SESSION);
        assert_eq!(changes.city.as_deref(), Some("Shelbyville"));
        assert!(changes.street.is_none());
    }
}
