//! Brazilian postal code (CEP) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PostalCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PostalCodeError {
    /// The input string is empty.
    #[error("postal code cannot be empty")]
    Empty,
    /// The input does not have the `NNNNN-NNN` shape.
    #[error("postal code must match NNNNN-NNN")]
    InvalidFormat,
}

/// A Brazilian postal code (CEP).
///
/// ## Constraints
///
/// - Exactly eight ASCII digits
/// - [`PostalCode::parse`] accepts an optional hyphen after the fifth digit
///   (`01001-000` or `01001000`)
/// - [`PostalCode::parse_cep`] requires the hyphen (`01001-000`)
///
/// The original spelling is preserved; [`PostalCode::digits`] strips the hyphen.
///
/// ## Examples
///
/// ```
/// use address_registry_core::PostalCode;
///
/// assert!(PostalCode::parse("01001-000").is_ok());
/// assert!(PostalCode::parse("01001000").is_ok());
/// assert!(PostalCode::parse_cep("01001000").is_err());
/// assert!(PostalCode::parse("1234-567").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    /// Number of digits in a CEP.
    pub const DIGITS: usize = 8;

    /// Parse a postal code, accepting `NNNNN-NNN` or `NNNNNNNN`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or not eight digits with an
    /// optional hyphen after the fifth.
    pub fn parse(s: &str) -> Result<Self, PostalCodeError> {
        if s.is_empty() {
            return Err(PostalCodeError::Empty);
        }

        let bytes = s.as_bytes();
        let valid = match bytes.len() {
            8 => bytes.iter().all(u8::is_ascii_digit),
            9 => is_hyphenated(bytes),
            _ => false,
        };

        if !valid {
            return Err(PostalCodeError::InvalidFormat);
        }

        Ok(Self(s.to_owned()))
    }

    /// Parse a postal code in the strict `NNNNN-NNN` form.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or the hyphen is missing.
    pub fn parse_cep(s: &str) -> Result<Self, PostalCodeError> {
        if s.is_empty() {
            return Err(PostalCodeError::Empty);
        }

        if !is_hyphenated(s.as_bytes()) {
            return Err(PostalCodeError::InvalidFormat);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the postal code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PostalCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the eight digits without the hyphen.
    #[must_use]
    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }
}

fn is_hyphenated(bytes: &[u8]) -> bool {
    match bytes.split_at_checked(5) {
        Some((head, [b'-', tail @ ..])) => {
            tail.len() == 3
                && head.iter().all(u8::is_ascii_digit)
                && tail.iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PostalCode {
    type Err = PostalCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PostalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
