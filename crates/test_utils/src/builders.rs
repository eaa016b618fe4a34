//! Test Data Builders
//!
//! Builders that fill in sensible defaults so a test only states the fields it
//! cares about.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimStatus, NewClaim};

use crate::fixtures::TemporalFixtures;

/// Builder for stored claims, bypassing the submission rules
///
/// Useful for seeding a mock store with claims in any status.
pub struct ClaimBuilder {
    id: ClaimId,
    lecturer_name: String,
    hours_worked: Decimal,
    hourly_rate: Decimal,
    notes: Option<String>,
    status: ClaimStatus,
    document_path: String,
    submitted_at: DateTime<Utc>,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    pub fn new() -> Self {
        Self {
            id: ClaimId::new_v7(),
            lecturer_name: "Thandi Mokoena".to_string(),
            hours_worked: dec!(10),
            hourly_rate: dec!(50),
            notes: None,
            status: ClaimStatus::Pending,
            document_path: "/uploads/timesheet.pdf".to_string(),
            submitted_at: TemporalFixtures::term_start(),
        }
    }

    pub fn with_id(mut self, id: ClaimId) -> Self {
        self.id = id;
        self
    }

    pub fn with_lecturer_name(mut self, name: impl Into<String>) -> Self {
        self.lecturer_name = name.into();
        self
    }

    pub fn with_hours(mut self, hours: Decimal) -> Self {
        self.hours_worked = hours;
        self
    }

    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.hourly_rate = rate;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    pub fn approved(self) -> Self {
        self.with_status(ClaimStatus::Approved)
    }

    pub fn rejected(self) -> Self {
        self.with_status(ClaimStatus::Rejected)
    }

    pub fn with_document_path(mut self, path: impl Into<String>) -> Self {
        self.document_path = path.into();
        self
    }

    pub fn submitted_at(mut self, at: DateTime<Utc>) -> Self {
        self.submitted_at = at;
        self
    }

    /// Builds the record without an identifier, for store `create` calls
    pub fn build_new(self) -> NewClaim {
        NewClaim {
            lecturer_name: self.lecturer_name,
            hours_worked: self.hours_worked,
            hourly_rate: self.hourly_rate,
            notes: self.notes,
            status: self.status,
            document_path: self.document_path,
            submitted_at: self.submitted_at,
        }
    }

    pub fn build(self) -> Claim {
        let id = self.id;
        self.build_new().into_claim(id)
    }
}
