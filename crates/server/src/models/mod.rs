//! Domain models for the address server.

pub mod address;

pub use address::{Address, AddressChanges, AddressFilter, CEP_COUNTRY, NewAddress};
