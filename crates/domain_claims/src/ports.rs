//! Claims Domain Ports
//!
//! The claim engine depends on two collaborators, both expressed as port
//! traits so they can be swapped without touching the lifecycle rules:
//!
//! - [`ClaimRecordPort`]: persistent storage for claim records
//!   (PostgreSQL adapter in `infra_db`, in-memory mock for tests)
//! - [`DocumentPort`]: storage for uploaded supporting documents
//!   ([`crate::adapters::LocalDocumentStore`], in-memory mock for tests)
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_claims::{ClaimService, ClaimRules, LocalDocumentStore};
//! use infra_db::adapters::PostgresClaimStore;
//!
//! let records = Arc::new(PostgresClaimStore::new(pool));
//! let documents = Arc::new(LocalDocumentStore::new("wwwroot/uploads", "/uploads", rules.documents.clone()));
//! let service = ClaimService::new(records, documents, rules);
//! ```

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, PortError};

use crate::claim::{Claim, ClaimStatus, NewClaim};
use crate::document::{Attachment, DocumentRef};

/// Persistent store for claim records
///
/// Each method is a single atomic operation against the store; the engine
/// never spans several calls with a transaction.
#[async_trait]
pub trait ClaimRecordPort: DomainPort + HealthCheckable {
    /// Persists a new claim and returns the identifier the store assigned
    async fn create(&self, claim: &NewClaim) -> Result<ClaimId, PortError>;

    /// Looks up a claim, `None` if no record exists
    async fn find(&self, id: ClaimId) -> Result<Option<Claim>, PortError>;

    /// Overwrites an existing record
    ///
    /// Returns `PortError::NotFound` if the record disappeared.
    async fn update(&self, claim: &Claim) -> Result<(), PortError>;

    /// Removes a record
    ///
    /// Returns `PortError::NotFound` if there was nothing to remove.
    async fn delete(&self, id: ClaimId) -> Result<(), PortError>;

    /// All claims with the given status, in store order
    async fn filter_by_status(&self, status: ClaimStatus) -> Result<Vec<Claim>, PortError>;

    /// Every claim, in store order
    async fn all(&self) -> Result<Vec<Claim>, PortError>;
}

/// Storage for supporting documents
#[async_trait]
pub trait DocumentPort: DomainPort {
    /// Stores an attachment and returns a stable reference to it
    ///
    /// Adapters enforce their own allow-list and size limit and answer with
    /// `PortError::Validation` when the file is refused.
    async fn store(&self, attachment: &Attachment) -> Result<DocumentRef, PortError>;

    /// Reads a stored document back
    async fn retrieve(&self, reference: &DocumentRef) -> Result<Vec<u8>, PortError>;

    /// Deletes a stored document
    ///
    /// Returns `PortError::NotFound` if nothing is stored under the reference.
    async fn remove(&self, reference: &DocumentRef) -> Result<(), PortError>;
}

/// In-memory implementations for testing
///
/// Every instance owns its own state; nothing here is process-global.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    use crate::document::DocumentPolicy;

    /// In-memory mock of [`ClaimRecordPort`]
    ///
    /// Keeps insertion order so list results are predictable in tests.
    #[derive(Debug, Default)]
    pub struct MockClaimRecordPort {
        claims: Arc<RwLock<Vec<Claim>>>,
        unavailable: AtomicBool,
    }

    impl MockClaimRecordPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the store, bypassing the engine
        pub async fn with_claims(claims: Vec<Claim>) -> Self {
            let port = Self::new();
            port.claims.write().await.extend(claims);
            port
        }

        /// Makes every subsequent call fail with a connection error
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        pub async fn len(&self) -> usize {
            self.claims.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.claims.read().await.is_empty()
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(PortError::connection("mock claim store unavailable"));
            }
            Ok(())
        }
    }

    impl DomainPort for MockClaimRecordPort {}

    #[async_trait]
    impl HealthCheckable for MockClaimRecordPort {
        async fn health_check(&self) -> HealthCheckResult {
            let mut result = HealthCheckResult::healthy("mock-claim-store");
            if self.unavailable.load(Ordering::SeqCst) {
                result.status = core_kernel::AdapterHealth::Unhealthy;
            }
            result
        }
    }

    #[async_trait]
    impl ClaimRecordPort for MockClaimRecordPort {
        async fn create(&self, claim: &NewClaim) -> Result<ClaimId, PortError> {
            self.check_available()?;
            let id = ClaimId::new_v7();
            self.claims.write().await.push(claim.clone().into_claim(id));
            Ok(id)
        }

        async fn find(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
            self.check_available()?;
            Ok(self.claims.read().await.iter().find(|c| c.id == id).cloned())
        }

        async fn update(&self, claim: &Claim) -> Result<(), PortError> {
            self.check_available()?;
            let mut claims = self.claims.write().await;
            let slot = claims
                .iter_mut()
                .find(|c| c.id == claim.id)
                .ok_or_else(|| PortError::not_found("Claim", claim.id))?;
            *slot = claim.clone();
            Ok(())
        }

        async fn delete(&self, id: ClaimId) -> Result<(), PortError> {
            self.check_available()?;
            let mut claims = self.claims.write().await;
            let before = claims.len();
            claims.retain(|c| c.id != id);
            if claims.len() == before {
                return Err(PortError::not_found("Claim", id));
            }
            Ok(())
        }

        async fn filter_by_status(&self, status: ClaimStatus) -> Result<Vec<Claim>, PortError> {
            self.check_available()?;
            Ok(self
                .claims
                .read()
                .await
                .iter()
                .filter(|c| c.status == status)
                .cloned()
                .collect())
        }

        async fn all(&self) -> Result<Vec<Claim>, PortError> {
            self.check_available()?;
            Ok(self.claims.read().await.clone())
        }
    }

    /// In-memory mock of [`DocumentPort`]
    #[derive(Debug, Default)]
    pub struct MockDocumentPort {
        policy: DocumentPolicy,
        documents: Arc<RwLock<HashMap<DocumentRef, Vec<u8>>>>,
        sequence: AtomicU64,
    }

    impl MockDocumentPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_policy(policy: DocumentPolicy) -> Self {
            Self {
                policy,
                ..Self::default()
            }
        }

        pub async fn stored_count(&self) -> usize {
            self.documents.read().await.len()
        }
    }

    impl DomainPort for MockDocumentPort {}

    #[async_trait]
    impl DocumentPort for MockDocumentPort {
        async fn store(&self, attachment: &Attachment) -> Result<DocumentRef, PortError> {
            self.policy
                .check(attachment)
                .map_err(|e| PortError::validation_field(e.to_string(), "document"))?;
            let name = attachment
                .safe_file_name()
                .map_err(|e| PortError::validation_field(e.to_string(), "document"))?;

            let n = self.sequence.fetch_add(1, Ordering::SeqCst);
            let reference = DocumentRef::new(format!("/uploads/{}_{}", n, name));
            self.documents
                .write()
                .await
                .insert(reference.clone(), attachment.bytes.clone());
            Ok(reference)
        }

        async fn retrieve(&self, reference: &DocumentRef) -> Result<Vec<u8>, PortError> {
            self.documents
                .read()
                .await
                .get(reference)
                .cloned()
                .ok_or_else(|| PortError::not_found("Document", reference))
        }

        async fn remove(&self, reference: &DocumentRef) -> Result<(), PortError> {
            self.documents
                .write()
                .await
                .remove(reference)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Document", reference))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{MockClaimRecordPort, MockDocumentPort};
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn new_claim(status: ClaimStatus) -> NewClaim {
        NewClaim {
            lecturer_name: "Lecturer".to_string(),
            hours_worked: dec!(10),
            hourly_rate: dec!(50),
            notes: None,
            status,
            document_path: "/uploads/doc.pdf".to_string(),
            submitted_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_mock_create_and_find() {
        let port = MockClaimRecordPort::new();
        let id = port.create(&new_claim(ClaimStatus::Pending)).await.unwrap();

        let found = port.find(id).await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.status, ClaimStatus::Pending);
        assert!(port.find(ClaimId::new_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_filter_by_status() {
        let port = MockClaimRecordPort::new();
        port.create(&new_claim(ClaimStatus::Pending)).await.unwrap();
        port.create(&new_claim(ClaimStatus::Approved)).await.unwrap();
        port.create(&new_claim(ClaimStatus::Pending)).await.unwrap();

        assert_eq!(port.filter_by_status(ClaimStatus::Pending).await.unwrap().len(), 2);
        assert_eq!(port.filter_by_status(ClaimStatus::Approved).await.unwrap().len(), 1);
        assert_eq!(port.all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_mock_delete_missing_is_not_found() {
        let port = MockClaimRecordPort::new();
        let err = port.delete(ClaimId::new_v7()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_mock_unavailable() {
        let port = MockClaimRecordPort::new();
        port.set_unavailable(true);
        assert!(port.all().await.unwrap_err().is_transient());
        assert!(!port.health_check().await.is_healthy());
    }

    #[tokio::test]
    async fn test_mock_documents_round_trip() {
        let port = MockDocumentPort::new();
        let reference = port
            .store(&Attachment::new("hours.pdf", b"%PDF-1.7".to_vec()))
            .await
            .unwrap();

        assert!(reference.as_str().starts_with("/uploads/"));
        assert!(reference.as_str().ends_with("hours.pdf"));
        assert_eq!(port.retrieve(&reference).await.unwrap(), b"%PDF-1.7".to_vec());

        port.remove(&reference).await.unwrap();
        assert_eq!(port.stored_count().await, 0);
        assert!(port.remove(&reference).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_mock_documents_refuse_disallowed_type() {
        let port = MockDocumentPort::new();
        let err = port
            .store(&Attachment::new("script.sh", b"#!/bin/sh".to_vec()))
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Validation { .. }));
        assert_eq!(port.stored_count().await, 0);
    }
}
