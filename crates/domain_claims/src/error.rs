//! Claims domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{ClaimId, PortError};

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Claim not found: {0}")]
    NotFound(ClaimId),

    #[error("Store failure: {0}")]
    Store(#[from] PortError),

    /// A stored figure pair or report total no longer fits in a `Decimal`
    #[error("Payment total overflowed: {0}")]
    PaymentOverflow(String),
}

impl ClaimError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClaimError::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClaimError::Validation(_))
    }
}

/// Bad submission input; returned to the caller for correction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Lecturer name is required")]
    MissingLecturerName,

    #[error("Hours worked must be greater than zero, got {0}")]
    NonPositiveHours(Decimal),

    #[error("Hourly rate must be greater than zero, got {0}")]
    NonPositiveRate(Decimal),

    #[error("Total payment for {hours_worked} hours at {hourly_rate} is too large to record")]
    TotalOutOfRange {
        hours_worked: Decimal,
        hourly_rate: Decimal,
    },

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Problems with the supporting document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("Please upload a supporting document")]
    Missing,

    #[error("The supporting document is empty")]
    Empty,

    #[error("Invalid document file name: {0:?}")]
    InvalidFileName(String),

    #[error("Invalid file type {extension:?}; allowed types: {allowed}")]
    DisallowedType { extension: String, allowed: String },

    #[error("Document is {size} bytes; the limit is {max} bytes")]
    TooLarge { size: u64, max: u64 },

    #[error("Document store rejected the file: {0}")]
    Rejected(String),
}
