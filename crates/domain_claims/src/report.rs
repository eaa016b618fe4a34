//! Payment report over approved claims

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;

use crate::claim::{compute_total_payment, Claim, ClaimStatus};
use crate::error::ClaimError;

/// One approved claim in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReportLine {
    pub claim_id: ClaimId,
    pub lecturer_name: String,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub total_payment: Decimal,
    pub submitted_at: DateTime<Utc>,
}

/// Totals owed for approved claims
///
/// Claims in any other status are left out, so the report can be built from
/// an unfiltered list as well as from `ClaimService::list_approved`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReport {
    pub generated_at: DateTime<Utc>,
    pub lines: Vec<PaymentReportLine>,
    pub grand_total: Decimal,
}

impl PaymentReport {
    /// Builds the report, failing if a line or the grand total overflows
    pub fn from_claims(claims: impl IntoIterator<Item = Claim>) -> Result<Self, ClaimError> {
        let mut lines = Vec::new();
        for claim in claims.into_iter().filter(|c| c.status == ClaimStatus::Approved) {
            let total_payment = compute_total_payment(&claim).ok_or_else(|| {
                ClaimError::PaymentOverflow(format!("total payment of claim {}", claim.id))
            })?;
            lines.push(PaymentReportLine {
                claim_id: claim.id,
                total_payment,
                lecturer_name: claim.lecturer_name,
                hours_worked: claim.hours_worked,
                hourly_rate: claim.hourly_rate,
                submitted_at: claim.submitted_at,
            });
        }
        lines.sort_by(|a, b| {
            a.submitted_at
                .cmp(&b.submitted_at)
                .then_with(|| a.claim_id.cmp(&b.claim_id))
        });

        let grand_total = lines
            .iter()
            .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.total_payment))
            .ok_or_else(|| ClaimError::PaymentOverflow("report grand total".to_string()))?;

        Ok(Self {
            generated_at: Utc::now(),
            lines,
            grand_total,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
