//! Helpers used across the application.
//!
//! - [`short_id`] - Short id generation
//! - [`url_validator`] - Target URL validation

pub mod short_id;
pub mod url_validator;
