//! Core types for the address registry.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod postal_code;

pub use id::*;
pub use postal_code::{PostalCode, PostalCodeError};
