//! Core types and trait definitions for the tourist-club store.
//!
//! This crate is free of HTTP and database dependencies. It holds the domain
//! records, the `ClubStore` abstraction and the filter composition engine
//! every search endpoint is built from.

pub mod attribute;
pub mod error;
pub mod filter;
pub mod org;
pub mod person;
pub mod search;
pub mod store;
pub mod tour;

pub use error::{Error, ErrorKind, Result, StoreError};
