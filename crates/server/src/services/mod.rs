//! Business logic services.
//!
//! - `addresses` - Address CRUD and CEP-based creation

pub mod addresses;

pub use addresses::{AddressError, AddressService};
