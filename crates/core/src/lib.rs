//! Address Registry Core - Shared types library.
//!
//! This crate provides common types used across all address registry components:
//! - `server` - HTTP API for session-scoped addresses
//! - `cli` - Command-line tools for migrations
//! - `integration-tests` - End-to-end tests against a running server
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and postal codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
