//! Custom Test Assertions
//!
//! Assertion helpers that print the whole claim when they fail.

use rust_decimal::Decimal;

use domain_claims::{Claim, ClaimStatus, PaymentReport};

/// Asserts a claim is in the expected status
pub fn assert_claim_status(claim: &Claim, expected: ClaimStatus) {
    assert_eq!(
        claim.status, expected,
        "Expected claim {} to be {}, got {}: {:?}",
        claim.id, expected, claim.status, claim
    );
}

/// Asserts a claim was rejected on submission with an explanatory note
pub fn assert_auto_rejected(claim: &Claim, note_fragment: &str) {
    assert_claim_status(claim, ClaimStatus::Rejected);
    let notes = claim.notes.as_deref().unwrap_or_default();
    assert!(
        notes.starts_with("Automatically rejected"),
        "Expected an automatic rejection note, got {:?}",
        claim.notes
    );
    assert!(
        notes.contains(note_fragment),
        "Expected rejection note to mention {:?}, got {:?}",
        note_fragment,
        notes
    );
}

/// Asserts a claim's total payment
pub fn assert_total_payment(claim: &Claim, expected: Decimal) {
    assert_eq!(
        claim.total_payment(),
        Some(expected),
        "Total payment mismatch for {} ({} x {})",
        claim.id,
        claim.hours_worked,
        claim.hourly_rate
    );
}

/// Asserts the report total equals the sum of its lines
pub fn assert_report_consistent(report: &PaymentReport) {
    let sum = report
        .lines
        .iter()
        .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.total_payment))
        .expect("report lines overflow when summed");
    assert_eq!(
        report.grand_total, sum,
        "Report grand total {} does not match line sum {}",
        report.grand_total, sum
    );
    for line in &report.lines {
        assert_eq!(
            Some(line.total_payment),
            line.hours_worked.checked_mul(line.hourly_rate),
            "Line for claim {} has an inconsistent total",
            line.claim_id
        );
    }
}
