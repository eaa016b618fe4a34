//! Claims DTOs

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;
use domain_claims::{Attachment, Claim, ClaimCandidate, ClaimStatus};

use crate::error::ApiError;

/// Fields of the multipart submission form
#[derive(Debug, Default)]
pub struct SubmitClaimForm {
    pub lecturer_name: Option<String>,
    pub hours_worked: Option<String>,
    pub hourly_rate: Option<String>,
    pub notes: Option<String>,
    pub document: Option<Attachment>,
}

impl SubmitClaimForm {
    /// Parses the figures; everything else is checked by the claim engine
    pub fn into_submission(self) -> Result<(ClaimCandidate, Option<Attachment>), ApiError> {
        let hours_worked = parse_decimal("hours_worked", self.hours_worked)?;
        let hourly_rate = parse_decimal("hourly_rate", self.hourly_rate)?;

        let mut candidate =
            ClaimCandidate::new(self.lecturer_name.unwrap_or_default(), hours_worked, hourly_rate);
        if let Some(notes) = self.notes.filter(|n| !n.trim().is_empty()) {
            candidate = candidate.with_notes(notes);
        }
        Ok((candidate, self.document))
    }
}

fn parse_decimal(field: &str, value: Option<String>) -> Result<Decimal, ApiError> {
    let value = value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::validation(format!("{} is required", field)))?;
    Decimal::from_str(value.trim())
        .map_err(|_| ApiError::validation(format!("{} must be a number, got {:?}", field, value)))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub id: ClaimId,
    pub lecturer_name: String,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    /// `None` when the stored figures overflow
    pub total_payment: Option<Decimal>,
    pub notes: Option<String>,
    pub status: ClaimStatus,
    pub document_path: String,
    pub submitted_at: DateTime<Utc>,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            total_payment: claim.total_payment(),
            id: claim.id,
            lecturer_name: claim.lecturer_name,
            hours_worked: claim.hours_worked,
            hourly_rate: claim.hourly_rate,
            notes: claim.notes,
            status: claim.status,
            document_path: claim.document_path,
            submitted_at: claim.submitted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn form(hours: &str, rate: &str) -> SubmitClaimForm {
        SubmitClaimForm {
            lecturer_name: Some("A".to_string()),
            hours_worked: Some(hours.to_string()),
            hourly_rate: Some(rate.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_figures_are_parsed() {
        let (candidate, document) = form("12.5", " 180 ").into_submission().unwrap();
        assert_eq!(candidate.hours_worked, dec!(12.5));
        assert_eq!(candidate.hourly_rate, dec!(180));
        assert!(candidate.notes.is_none());
        assert!(document.is_none());
    }

    #[test]
    fn test_unparsable_figures_are_validation_errors() {
        assert!(matches!(
            form("ten", "50").into_submission(),
            Err(ApiError::Validation { .. })
        ));
        assert!(matches!(
            form("10", "").into_submission(),
            Err(ApiError::Validation { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_positive_figures_survive_form_parsing(
            hours in 1u32..100_000,
            cents in 1u32..100_000,
        ) {
            let hours = Decimal::new(hours as i64, 1);
            let rate = Decimal::new(cents as i64, 2);
            let (candidate, _) = form(&hours.to_string(), &rate.to_string())
                .into_submission()
                .unwrap();
            prop_assert_eq!(candidate.hours_worked, hours);
            prop_assert_eq!(candidate.hourly_rate, rate);
        }
    }
}
