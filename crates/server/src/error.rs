//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Every error is rendered as JSON:
//! `{ "statusCode": 404, "error": "Not Found", "message": "Address not found" }`,
//! with an extra `fields` list for validation failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::AddressError;

/// Violated rules for one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Wire (camelCase) field name.
    pub field: String,
    /// One message per violated rule.
    pub messages: Vec<String>,
}

/// Application-level error type for the address service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body failed field validation.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Bad request from client (malformed JSON, bad path parameter).
    #[error("{0}")]
    BadRequest(String),

    /// Address operation failed.
    #[error(transparent)]
    Address(#[from] AddressError),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    status_code: u16,
    error: &'a str,
    message: String,
    #[serde(skip_serializing_if = "<[FieldError]>::is_empty")]
    fields: &'a [FieldError],
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::BadRequest(_)
            | Self::Address(AddressError::Upstream(_) | AddressError::Unclassified(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Address(AddressError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Address(AddressError::Conflict(_)) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture failures that are not the client's fault to Sentry
        if matches!(
            self,
            Self::Address(AddressError::Upstream(_) | AddressError::Unclassified(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();
        let fields = match &self {
            Self::Validation(fields) => fields.as_slice(),
            _ => &[],
        };
        let body = ErrorBody {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error"),
            message: self.to_string(),
            fields,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cep::CepError;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::BadRequest("test".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Validation(vec![]).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::from(AddressError::NotFound("x".to_string())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(AddressError::Conflict("x".to_string())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(AddressError::Upstream(CepError::Status { status: 500 })).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(AddressError::Unclassified("x".to_string())).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) =
            body_json(AddressError::NotFound("Address not found".to_string()).into()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            serde_json::json!({
                "statusCode": 404,
                "error": "Not Found",
                "message": "Address not found"
            })
        );
    }

    #[tokio::test]
    async fn test_validation_body_lists_fields() {
        let err = AppError::Validation(vec![FieldError {
            field: "postalCode".to_string(),
            messages: vec!["Invalid postal code format".to_string()],
        }]);

        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["statusCode"], 400);
        assert_eq!(body["error"], "Bad Request");
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["fields"][0]["field"], "postalCode");
        assert_eq!(body["fields"][0]["messages"][0], "Invalid postal code format");
    }

    #[tokio::test]
    async fn test_upstream_message_is_passed_through() {
        let err: AppError = AddressError::Upstream(CepError::Request("timed out".to_string())).into();
        let expected = err.to_string();

        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], expected);
        assert!(body.get("fields").is_none());
    }
}
