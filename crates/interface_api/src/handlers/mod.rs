//! Request handlers
//!
//! Each handler checks the caller's capability first, then makes one call
//! into a domain service.

pub mod claims;
pub mod health;
pub mod lecturers;
pub mod reports;

use std::str::FromStr;

use crate::error::ApiError;

/// Parses a path identifier, with or without its display prefix
pub(crate) fn parse_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid identifier: {}", raw)))
}
