//! PostgreSQL Claim Store
//!
//! Implements [`ClaimRecordPort`] on top of [`ClaimsRepository`]. The store
//! assigns time-ordered identifiers, so listing by `submitted_at` and then by
//! id reproduces submission order.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{AdapterHealth, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{Claim, ClaimRecordPort, ClaimStatus, NewClaim};

use crate::error::DatabaseError;
use crate::repositories::claims::{ClaimRow, ClaimsRepository};

const ADAPTER_ID: &str = "postgres-claim-store";

/// PostgreSQL-backed implementation of [`ClaimRecordPort`]
#[derive(Debug, Clone)]
pub struct PostgresClaimStore {
    repository: ClaimsRepository,
}

impl PostgresClaimStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimsRepository::new(pool),
        }
    }

    pub fn repository(&self) -> &ClaimsRepository {
        &self.repository
    }
}

impl DomainPort for PostgresClaimStore {}

#[async_trait]
impl HealthCheckable for PostgresClaimStore {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let result = self.repository.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(()) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        };
        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ClaimRecordPort for PostgresClaimStore {
    #[instrument(skip(self, claim), fields(status = %claim.status))]
    async fn create(&self, claim: &NewClaim) -> Result<ClaimId, PortError> {
        let id = ClaimId::new_v7();
        let row = claim_to_row(&claim.clone().into_claim(id));
        self.repository.insert(&row).await?;
        debug!(claim_id = %id, "Claim row inserted");
        Ok(id)
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn find(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
        self.repository
            .get_by_id(id.into())
            .await?
            .map(row_to_claim)
            .transpose()
    }

    #[instrument(skip(self, claim), fields(claim_id = %claim.id))]
    async fn update(&self, claim: &Claim) -> Result<(), PortError> {
        self.repository.update(&claim_to_row(claim)).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn delete(&self, id: ClaimId) -> Result<(), PortError> {
        self.repository.delete(id.into()).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn filter_by_status(&self, status: ClaimStatus) -> Result<Vec<Claim>, PortError> {
        rows_to_claims(self.repository.list(Some(status.as_str())).await?)
    }

    #[instrument(skip(self))]
    async fn all(&self) -> Result<Vec<Claim>, PortError> {
        rows_to_claims(self.repository.list(None).await?)
    }
}

fn claim_to_row(claim: &Claim) -> ClaimRow {
    ClaimRow {
        claim_id: claim.id.into(),
        lecturer_name: claim.lecturer_name.clone(),
        hours_worked: claim.hours_worked,
        hourly_rate: claim.hourly_rate,
        notes: claim.notes.clone(),
        status: claim.status.as_str().to_string(),
        document_path: claim.document_path.clone(),
        submitted_at: claim.submitted_at,
    }
}

fn row_to_claim(row: ClaimRow) -> Result<Claim, PortError> {
    let status: ClaimStatus = row
        .status
        .parse()
        .map_err(|e: domain_claims::claim::UnknownStatus| DatabaseError::CorruptRow(e.to_string()))?;

    Ok(Claim {
        id: ClaimId::from_uuid(row.claim_id),
        lecturer_name: row.lecturer_name,
        hours_worked: row.hours_worked,
        hourly_rate: row.hourly_rate,
        notes: row.notes,
        status,
        document_path: row.document_path,
        submitted_at: row.submitted_at,
    })
}

fn rows_to_claims(rows: Vec<ClaimRow>) -> Result<Vec<Claim>, PortError> {
    rows.into_iter().map(row_to_claim).collect()
}
