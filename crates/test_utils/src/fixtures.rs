//! Pre-built Test Fixtures
//!
//! Consistent, predictable test data for unit and integration tests.

use chrono::{DateTime, TimeZone, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_claims::{Attachment, ClaimCandidate};
use domain_lecturer::LecturerDetails;

/// Claim submission fixtures
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// A claim well inside both ceilings: 10 hours at 50
    pub fn typical() -> ClaimCandidate {
        ClaimCandidate::new("Thandi Mokoena", dec!(10), dec!(50)).with_notes("Tutorials, week 1")
    }

    /// A claim exactly on both default ceilings
    pub fn at_limits() -> ClaimCandidate {
        ClaimCandidate::new("Thandi Mokoena", dec!(252), dec!(200))
    }

    /// Hours above the default ceiling
    pub fn excessive_hours() -> ClaimCandidate {
        ClaimCandidate::new("Thandi Mokoena", dec!(300), dec!(50))
    }

    /// Rate above the default ceiling
    pub fn excessive_rate() -> ClaimCandidate {
        ClaimCandidate::new("Thandi Mokoena", dec!(10), dec!(250))
    }

    /// A claim for a randomly named lecturer
    pub fn random(hours: Decimal, rate: Decimal) -> ClaimCandidate {
        let name: String = Name().fake();
        ClaimCandidate::new(name, hours, rate)
    }
}

/// Supporting document fixtures
pub struct AttachmentFixtures;

impl AttachmentFixtures {
    pub fn pdf() -> Attachment {
        Attachment::new("timesheet.pdf", b"%PDF-1.7\n%test\n".to_vec())
            .with_content_type("application/pdf")
    }

    pub fn docx() -> Attachment {
        Attachment::new("timesheet.docx", b"PK\x03\x04docx".to_vec())
    }

    pub fn xlsx() -> Attachment {
        Attachment::new("timesheet.xlsx", b"PK\x03\x04xlsx".to_vec())
    }

    /// An extension outside the allow-list
    pub fn executable() -> Attachment {
        Attachment::new("payload.exe", b"MZ".to_vec())
    }

    /// A PDF of the given size in bytes
    pub fn pdf_of_size(size: usize) -> Attachment {
        Attachment::new("large.pdf", vec![b'0'; size])
    }
}

/// Lecturer record fixtures
pub struct LecturerFixtures;

impl LecturerFixtures {
    pub fn thandi() -> LecturerDetails {
        LecturerDetails::new("Thandi Mokoena", "thandi.mokoena@example.com")
            .with_contact_number("+27 21 555 0101")
    }

    /// Random but valid details
    pub fn random() -> LecturerDetails {
        let name: String = Name().fake();
        let email: String = SafeEmail().fake();
        LecturerDetails::new(name, email)
    }
}

/// Fixed timestamps
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Start of the first teaching term
    pub fn term_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 12, 8, 0, 0).unwrap()
    }

    /// A given day of March 2024 at 09:00
    pub fn march(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()
    }
}
