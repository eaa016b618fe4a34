//! Claim aggregate

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;

/// Claim status
///
/// `Approved` and `Rejected` are terminal: no code path re-opens a decided
/// claim, although reviewers may overwrite one decision with the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Awaiting a reviewer decision
    Pending,
    /// Approved for payment
    Approved,
    /// Rejected by a reviewer or by the submission rules
    Rejected,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
        }
    }

    /// Returns true once a decision has been recorded
    pub fn is_decided(&self) -> bool {
        !matches!(self, ClaimStatus::Pending)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored status string is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown claim status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ClaimStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ClaimStatus::Pending),
            "Approved" => Ok(ClaimStatus::Approved),
            "Rejected" => Ok(ClaimStatus::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// What a lecturer fills in when submitting a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimCandidate {
    pub lecturer_name: String,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub notes: Option<String>,
}

impl ClaimCandidate {
    pub fn new(lecturer_name: impl Into<String>, hours_worked: Decimal, hourly_rate: Decimal) -> Self {
        Self {
            lecturer_name: lecturer_name.into(),
            hours_worked,
            hourly_rate,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Payment the claim would be worth, `None` if it does not fit in a `Decimal`
    pub fn total_payment(&self) -> Option<Decimal> {
        self.hours_worked.checked_mul(self.hourly_rate)
    }
}

/// A claim that has passed validation but has no identifier yet
///
/// The record store assigns the identifier when it persists the claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClaim {
    pub lecturer_name: String,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub notes: Option<String>,
    pub status: ClaimStatus,
    pub document_path: String,
    pub submitted_at: DateTime<Utc>,
}

impl NewClaim {
    /// Attaches the store-assigned identifier
    pub fn into_claim(self, id: ClaimId) -> Claim {
        Claim {
            id,
            lecturer_name: self.lecturer_name,
            hours_worked: self.hours_worked,
            hourly_rate: self.hourly_rate,
            notes: self.notes,
            status: self.status,
            document_path: self.document_path,
            submitted_at: self.submitted_at,
        }
    }
}

/// A lecturer's claim for payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Store-assigned identifier
    pub id: ClaimId,
    /// Name of the lecturer claiming payment
    pub lecturer_name: String,
    /// Hours worked in the claim period
    pub hours_worked: Decimal,
    /// Agreed hourly rate
    pub hourly_rate: Decimal,
    /// Lecturer notes, or the explanation of an automatic rejection
    pub notes: Option<String>,
    /// Lifecycle status
    pub status: ClaimStatus,
    /// Reference returned by the document store
    pub document_path: String,
    /// Submission timestamp
    pub submitted_at: DateTime<Utc>,
}

impl Claim {
    /// Total payment owed for this claim
    pub fn total_payment(&self) -> Option<Decimal> {
        compute_total_payment(self)
    }
}

/// Hours worked multiplied by the hourly rate
///
/// Every report uses this one calculation. Returns `None` when the product
/// overflows `Decimal`; submission refuses such figures, but rows written
/// outside the engine can still carry them.
pub fn compute_total_payment(claim: &Claim) -> Option<Decimal> {
    claim.hours_worked.checked_mul(claim.hourly_rate)
}
