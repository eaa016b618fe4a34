//! Lecturer domain errors

use thiserror::Error;

use core_kernel::{LecturerId, PortError};

/// Errors that can occur in the lecturer domain
#[derive(Debug, Error)]
pub enum LecturerError {
    /// Lecturer with the given ID was not found
    #[error("Lecturer not found: {0}")]
    NotFound(LecturerId),

    /// Another lecturer already uses this email address
    #[error("A lecturer with email {0} already exists")]
    DuplicateEmail(String),

    /// Details failed validation
    #[error("Lecturer validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The record store failed
    #[error("Store failure: {0}")]
    Store(#[from] PortError),
}

impl LecturerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LecturerError::NotFound(_))
    }
}
