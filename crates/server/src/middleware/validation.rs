//! Validated JSON body extractor.
//!
//! Deserializes the body like `axum::Json` and then runs `validator` rules,
//! so handlers only ever see well-formed input.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, FieldError};

/// Extractor that deserializes and validates a JSON body.
///
/// Rejects with `AppError::BadRequest` for unparseable bodies and
/// `AppError::Validation` for rule violations.
///
/// # Example
///
/// ```rust,ignore
/// async fn create(
///     ValidatedJson(dto): ValidatedJson<CreateAddressDto>,
/// ) -> impl IntoResponse {
///     dto.street
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| AppError::Validation(field_errors(&errors)))?;

        Ok(Self(value))
    }
}

/// Flatten `validator` errors into per-field messages, sorted by wire name.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| FieldError {
            field: to_camel_case(&field),
            messages: errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map_or_else(|| e.code.to_string(), ToString::to_string)
                })
                .collect(),
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// `postal_code` -> `postalCode`.
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct SampleBody {
        #[serde(default)]
        #[validate(length(min = 1, message = "postalCode is required"))]
        postal_code: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("postal_code"), "postalCode");
        assert_eq!(to_camel_case("session_id"), "sessionId");
        assert_eq!(to_camel_case("street"), "street");
    }

    #[tokio::test]
    async fn test_accepts_valid_body() {
        let ValidatedJson(dto) =
            ValidatedJson::<SampleBody>::from_request(json_request(r#"{"postal_code":"1"}"#), &())
                .await
                .unwrap();
        assert_eq!(dto.postal_code, "1");
    }

    #[tokio::test]
    async fn test_missing_field_is_field_error() {
        let err = ValidatedJson::<SampleBody>::from_request(json_request("{}"), &())
            .await
            .unwrap_err();

        let AppError::Validation(fields) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(
            fields,
            vec![FieldError {
                field: "postalCode".to_string(),
                messages: vec!["postalCode is required".to_string()],
            }]
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let err = ValidatedJson::<SampleBody>::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
