//! CEP lookup errors.

use thiserror::Error;

/// Errors that can occur when querying the CEP directory.
///
/// A CEP the directory does not know is not an error; lookups report it as
/// `Ok(None)`.
#[derive(Debug, Error)]
pub enum CepError {
    /// HTTP request failed (connect, TLS, timeout).
    #[error("CEP lookup request failed: {0}")]
    Request(String),

    /// Directory answered with a non-success status.
    #[error("CEP lookup returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Response body had an unexpected shape.
    #[error("CEP lookup response error: {0}")]
    Response(String),
}
