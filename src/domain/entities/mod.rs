//! Core domain entities.
//!
//! - [`Link`] - A persisted short id to target URL mapping
//! - [`NewLink`] - Input for creating a link
//! - [`InsertOutcome`] - Result of a constrained insert

pub mod link;

pub use link::{InsertOutcome, Link, NewLink, UniqueField};
