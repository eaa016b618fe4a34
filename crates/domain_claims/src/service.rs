//! Claim lifecycle engine
//!
//! [`ClaimService`] is the single place where claims are validated, stored,
//! listed and decided. Callers are expected to have checked the requesting
//! user's role before invoking an operation.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use core_kernel::{ClaimId, PortError};

use crate::claim::{Claim, ClaimCandidate, ClaimStatus, NewClaim};
use crate::document::{Attachment, DocumentRef};
use crate::error::{ClaimError, DocumentError, ValidationError};
use crate::ports::{ClaimRecordPort, DocumentPort};
use crate::rules::{Assessment, ClaimRules};

/// Orchestrates the claim lifecycle over the record and document stores
#[derive(Clone)]
pub struct ClaimService {
    records: Arc<dyn ClaimRecordPort>,
    documents: Arc<dyn DocumentPort>,
    rules: ClaimRules,
}

impl ClaimService {
    pub fn new(
        records: Arc<dyn ClaimRecordPort>,
        documents: Arc<dyn DocumentPort>,
        rules: ClaimRules,
    ) -> Self {
        Self {
            records,
            documents,
            rules,
        }
    }

    pub fn rules(&self) -> &ClaimRules {
        &self.rules
    }

    /// The record store, exposed for health checks
    pub fn records(&self) -> &Arc<dyn ClaimRecordPort> {
        &self.records
    }

    /// Validates and records a new claim
    ///
    /// This method:
    /// 1. Validates the candidate and the attachment; nothing is written on failure
    /// 2. Stores the attachment and keeps its reference
    /// 3. Applies the automatic rejection thresholds
    /// 4. Persists the claim, removing the stored attachment again if that fails
    ///
    /// # Errors
    ///
    /// * `ClaimError::Validation` - bad figures, missing name, missing or refused document
    /// * `ClaimError::Store` - a collaborator failed
    pub async fn submit(
        &self,
        candidate: ClaimCandidate,
        attachment: Option<Attachment>,
    ) -> Result<Claim, ClaimError> {
        let attachment = self.validate_submission(&candidate, attachment.as_ref())?;

        let reference = self.documents.store(attachment).await.map_err(|e| match e {
            PortError::Validation { message, .. } => {
                ClaimError::Validation(DocumentError::Rejected(message).into())
            }
            other => ClaimError::Store(other),
        })?;
        debug!(document = %reference, "Supporting document stored");

        let assessment = self.rules.assess(&candidate);
        let notes = match &assessment {
            Assessment::Accept => candidate.notes,
            Assessment::AutoReject(rejection) => Some(rejection.note()),
        };

        let new_claim = NewClaim {
            lecturer_name: candidate.lecturer_name.trim().to_string(),
            hours_worked: candidate.hours_worked,
            hourly_rate: candidate.hourly_rate,
            notes,
            status: assessment.initial_status(),
            document_path: reference.as_str().to_string(),
            submitted_at: Utc::now(),
        };

        let id = match self.records.create(&new_claim).await {
            Ok(id) => id,
            Err(e) => {
                // Nothing references the upload once the record write fails.
                if let Err(cleanup) = self.documents.remove(&reference).await {
                    warn!(document = %reference, error = %cleanup, "Orphaned document not removed");
                }
                return Err(ClaimError::Store(e));
            }
        };
        let claim = new_claim.into_claim(id);

        match assessment {
            Assessment::Accept => info!(claim_id = %claim.id, "Claim submitted for review"),
            Assessment::AutoReject(rejection) => warn!(
                claim_id = %claim.id,
                reason = ?rejection,
                "Claim rejected on submission"
            ),
        }
        Ok(claim)
    }

    /// Claims awaiting review
    pub async fn list_pending(&self) -> Result<Vec<Claim>, ClaimError> {
        Ok(self.records.filter_by_status(ClaimStatus::Pending).await?)
    }

    /// Every claim regardless of status
    pub async fn list_all(&self) -> Result<Vec<Claim>, ClaimError> {
        Ok(self.records.all().await?)
    }

    /// Approved claims, for HR reporting
    pub async fn list_approved(&self) -> Result<Vec<Claim>, ClaimError> {
        Ok(self.records.filter_by_status(ClaimStatus::Approved).await?)
    }

    /// Looks up a single claim
    pub async fn get(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.records.find(id).await?.ok_or(ClaimError::NotFound(id))
    }

    /// Loads a claim together with its supporting document
    pub async fn document(&self, id: ClaimId) -> Result<(Claim, Vec<u8>), ClaimError> {
        let claim = self.get(id).await?;
        let reference = DocumentRef::new(claim.document_path.clone());
        let bytes = self.documents.retrieve(&reference).await?;
        Ok((claim, bytes))
    }

    /// Marks a claim approved
    pub async fn approve(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.decide(id, ClaimStatus::Approved).await
    }

    /// Marks a claim rejected
    pub async fn reject(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.decide(id, ClaimStatus::Rejected).await
    }

    /// Removes a claim record
    pub async fn delete(&self, id: ClaimId) -> Result<(), ClaimError> {
        if self.records.find(id).await?.is_none() {
            return Err(ClaimError::NotFound(id));
        }
        self.records.delete(id).await.map_err(|e| not_found_or_store(id, e))?;
        info!(claim_id = %id, "Claim deleted");
        Ok(())
    }

    // Last write wins: concurrent decisions on the same claim are not arbitrated.
    async fn decide(&self, id: ClaimId, status: ClaimStatus) -> Result<Claim, ClaimError> {
        let mut claim = self.records.find(id).await?.ok_or(ClaimError::NotFound(id))?;

        if claim.status.is_decided() && claim.status != status {
            warn!(claim_id = %id, from = %claim.status, to = %status, "Overwriting earlier decision");
        }
        claim.status = status;
        self.records
            .update(&claim)
            .await
            .map_err(|e| not_found_or_store(id, e))?;

        info!(claim_id = %id, status = %status, "Claim decided");
        Ok(claim)
    }

    fn validate_submission<'a>(
        &self,
        candidate: &ClaimCandidate,
        attachment: Option<&'a Attachment>,
    ) -> Result<&'a Attachment, ValidationError> {
        if candidate.lecturer_name.trim().is_empty() {
            return Err(ValidationError::MissingLecturerName);
        }
        if candidate.hours_worked <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveHours(candidate.hours_worked));
        }
        if candidate.hourly_rate <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveRate(candidate.hourly_rate));
        }
        if candidate.total_payment().is_none() {
            return Err(ValidationError::TotalOutOfRange {
                hours_worked: candidate.hours_worked,
                hourly_rate: candidate.hourly_rate,
            });
        }

        let attachment = attachment.ok_or(DocumentError::Missing)?;
        self.rules.documents.check(attachment)?;
        Ok(attachment)
    }
}

// The record vanished between the lookup and the write.
fn not_found_or_store(id: ClaimId, error: PortError) -> ClaimError {
    if error.is_not_found() {
        ClaimError::NotFound(id)
    } else {
        ClaimError::Store(error)
    }
}
