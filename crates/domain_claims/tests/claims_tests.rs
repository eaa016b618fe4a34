//! Lifecycle tests for domain_claims
//!
//! Exercise the engine end to end over the in-memory ports.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::collection::vec;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::ClaimId;
use domain_claims::ports::mock::{MockClaimRecordPort, MockDocumentPort};
use domain_claims::{
    compute_total_payment, Attachment, ClaimCandidate, ClaimError, ClaimRecordPort, ClaimRules,
    ClaimService, ClaimStatus, DocumentError, DocumentPolicy, PaymentReport, ValidationError,
};
use test_utils::{
    acceptable_candidate_strategy, assert_auto_rejected, assert_claim_status,
    assert_report_consistent, assert_total_payment, claim_status_strategy,
    excessive_hours_strategy, excessive_rate_strategy, non_positive_decimal_strategy,
    valid_hours_strategy, valid_rate_strategy, AttachmentFixtures, ClaimBuilder, ClaimFixtures,
};

struct Harness {
    service: ClaimService,
    records: Arc<MockClaimRecordPort>,
    documents: Arc<MockDocumentPort>,
}

fn harness_with(rules: ClaimRules) -> Harness {
    let records = Arc::new(MockClaimRecordPort::new());
    let documents = Arc::new(MockDocumentPort::with_policy(rules.documents.clone()));
    let service = ClaimService::new(records.clone(), documents.clone(), rules);
    Harness {
        service,
        records,
        documents,
    }
}

fn harness() -> Harness {
    harness_with(ClaimRules::default())
}

fn pdf() -> Option<Attachment> {
    Some(AttachmentFixtures::pdf())
}

// ============================================================================
// Submission
// ============================================================================

mod submission_tests {
    use super::*;

    #[tokio::test]
    async fn test_valid_claim_is_pending() {
        let h = harness();

        let claim = h.service.submit(ClaimFixtures::typical(), pdf()).await.unwrap();

        assert_claim_status(&claim, ClaimStatus::Pending);
        assert_total_payment(&claim, dec!(500));
        assert_eq!(claim.notes.as_deref(), Some("Tutorials, week 1"));
        assert!(claim.document_path.starts_with("/uploads/"));

        let stored = h.records.find(claim.id).await.unwrap().unwrap();
        assert_eq!(stored, claim);
        assert_eq!(h.documents.stored_count().await, 1);
    }

    #[tokio::test]
    async fn test_claim_on_both_ceilings_is_pending() {
        let h = harness();
        let claim = h.service.submit(ClaimFixtures::at_limits(), pdf()).await.unwrap();
        assert_claim_status(&claim, ClaimStatus::Pending);
        assert_total_payment(&claim, dec!(50400));
    }

    #[tokio::test]
    async fn test_hours_over_ceiling_rejected_on_submission() {
        let h = harness();

        let claim = h
            .service
            .submit(ClaimFixtures::excessive_hours(), pdf())
            .await
            .unwrap();

        assert_auto_rejected(&claim, "252 hours");
        assert!(claim.notes.unwrap().contains("300 hours"));
    }

    #[tokio::test]
    async fn test_rate_over_ceiling_rejected_on_submission() {
        let h = harness();

        let claim = h
            .service
            .submit(ClaimFixtures::excessive_rate(), pdf())
            .await
            .unwrap();

        assert_auto_rejected(&claim, "hourly rate of 200");
    }

    #[tokio::test]
    async fn test_overflowing_total_is_refused() {
        let h = harness();
        let huge = Decimal::from(10_000_000_000_000_000_000u64);

        let err = h
            .service
            .submit(ClaimCandidate::new("A", huge, huge), pdf())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClaimError::Validation(ValidationError::TotalOutOfRange { .. })
        ));
        assert!(h.records.is_empty().await);
        assert_eq!(h.documents.stored_count().await, 0);
    }

    #[tokio::test]
    async fn test_missing_attachment() {
        let h = harness();

        let err = h
            .service
            .submit(ClaimFixtures::typical(), None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClaimError::Validation(ValidationError::Document(DocumentError::Missing))
        ));
        assert!(h.records.is_empty().await);
    }

    #[tokio::test]
    async fn test_empty_attachment() {
        let h = harness();

        let err = h
            .service
            .submit(ClaimFixtures::typical(), Some(AttachmentFixtures::pdf_of_size(0)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClaimError::Validation(ValidationError::Document(DocumentError::Empty))
        ));
    }

    #[tokio::test]
    async fn test_allowed_office_documents() {
        let h = harness();
        for attachment in [AttachmentFixtures::docx(), AttachmentFixtures::xlsx()] {
            let claim = h
                .service
                .submit(ClaimFixtures::typical(), Some(attachment))
                .await
                .unwrap();
            assert_claim_status(&claim, ClaimStatus::Pending);
        }
        assert_eq!(h.documents.stored_count().await, 2);
    }

    #[tokio::test]
    async fn test_disallowed_attachment_type() {
        let h = harness();

        let err = h
            .service
            .submit(ClaimFixtures::typical(), Some(AttachmentFixtures::executable()))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains(".exe"));
        assert!(h.records.is_empty().await);
        assert_eq!(h.documents.stored_count().await, 0);
    }

    #[tokio::test]
    async fn test_oversize_attachment() {
        let rules = ClaimRules::default().with_documents(DocumentPolicy {
            max_size_bytes: 8,
            ..DocumentPolicy::default()
        });
        let h = harness_with(rules);

        let err = h
            .service
            .submit(ClaimFixtures::typical(), Some(AttachmentFixtures::pdf_of_size(9)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClaimError::Validation(ValidationError::Document(DocumentError::TooLarge { size: 9, max: 8 }))
        ));
        assert_eq!(h.documents.stored_count().await, 0);
    }

    #[tokio::test]
    async fn test_configured_ceilings_replace_defaults() {
        let h = harness_with(ClaimRules::default().with_max_hours(dec!(20)));

        let claim = h
            .service
            .submit(ClaimCandidate::new("A", dec!(21), dec!(50)), pdf())
            .await
            .unwrap();
        assert_auto_rejected(&claim, "20 hours");
    }

    #[tokio::test]
    async fn test_lecturer_name_is_trimmed() {
        let h = harness();
        let claim = h
            .service
            .submit(ClaimCandidate::new("  Dr. Naidoo ", dec!(1), dec!(1)), pdf())
            .await
            .unwrap();
        assert_eq!(claim.lecturer_name, "Dr. Naidoo");
    }

    #[tokio::test]
    async fn test_failed_record_write_leaves_no_document() {
        let h = harness();
        h.records.set_unavailable(true);

        let err = h
            .service
            .submit(ClaimFixtures::typical(), pdf())
            .await
            .unwrap_err();

        assert!(matches!(err, ClaimError::Store(_)));
        assert_eq!(h.documents.stored_count().await, 0);
    }
}

// ============================================================================
// Review decisions
// ============================================================================

mod review_tests {
    use super::*;

    async fn submit_pending(h: &Harness) -> ClaimId {
        h.service
            .submit(ClaimFixtures::random(dec!(10), dec!(50)), pdf())
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_approve_then_find() {
        let h = harness();
        let id = submit_pending(&h).await;

        h.service.approve(id).await.unwrap();

        let stored = h.records.find(id).await.unwrap().unwrap();
        assert_claim_status(&stored, ClaimStatus::Approved);
    }

    #[tokio::test]
    async fn test_reject_then_find() {
        let h = harness();
        let id = submit_pending(&h).await;

        h.service.reject(id).await.unwrap();

        let stored = h.records.find(id).await.unwrap().unwrap();
        assert_claim_status(&stored, ClaimStatus::Rejected);
    }

    #[tokio::test]
    async fn test_approve_is_idempotent() {
        let h = harness();
        let id = submit_pending(&h).await;

        let first = h.service.approve(id).await.unwrap();
        let second = h.service.approve(id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_decisions_only_change_status() {
        let h = harness();
        let submitted = h
            .service
            .submit(ClaimCandidate::new("A", dec!(10), dec!(50)).with_notes("week 12"), pdf())
            .await
            .unwrap();

        let approved = h.service.approve(submitted.id).await.unwrap();

        assert_eq!(approved.lecturer_name, submitted.lecturer_name);
        assert_eq!(approved.hours_worked, submitted.hours_worked);
        assert_eq!(approved.hourly_rate, submitted.hourly_rate);
        assert_eq!(approved.notes, submitted.notes);
        assert_eq!(approved.document_path, submitted.document_path);
        assert_eq!(approved.submitted_at, submitted.submitted_at);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found_and_store_unchanged() {
        let h = harness();
        let id = submit_pending(&h).await;
        let before = h.records.all().await.unwrap();
        let missing = ClaimId::new_v7();

        assert!(matches!(h.service.approve(missing).await, Err(ClaimError::NotFound(m)) if m == missing));
        assert!(h.service.reject(missing).await.unwrap_err().is_not_found());
        assert!(h.service.delete(missing).await.unwrap_err().is_not_found());
        assert!(h.service.get(missing).await.unwrap_err().is_not_found());

        assert_eq!(h.records.all().await.unwrap(), before);
        assert_eq!(h.records.find(id).await.unwrap().unwrap().status, ClaimStatus::Pending);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let h = harness();
        let id = submit_pending(&h).await;

        h.service.delete(id).await.unwrap();

        assert!(h.records.find(id).await.unwrap().is_none());
        assert!(h.service.delete(id).await.unwrap_err().is_not_found());
    }
}

// ============================================================================
// Listing and reporting
// ============================================================================

mod listing_tests {
    use super::*;

    #[tokio::test]
    async fn test_pending_after_approving_one_of_two() {
        let h = harness();
        let first = h
            .service
            .submit(ClaimFixtures::random(dec!(10), dec!(50)), pdf())
            .await
            .unwrap();
        let second = h
            .service
            .submit(ClaimFixtures::random(dec!(12), dec!(40)), pdf())
            .await
            .unwrap();

        h.service.approve(first.id).await.unwrap();

        let pending = h.service.list_pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, second.id);
    }

    #[tokio::test]
    async fn test_list_all_and_approved() {
        let h = harness();
        let mut ids = HashSet::new();
        for candidate in [
            ClaimFixtures::typical(),
            ClaimFixtures::random(dec!(20), dec!(50)),
            ClaimFixtures::excessive_hours(),
        ] {
            let claim = h.service.submit(candidate, pdf()).await.unwrap();
            ids.insert(claim.id);
        }
        let pending: Vec<ClaimId> = h
            .service
            .list_pending()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(pending.len(), 2);
        h.service.approve(pending[0]).await.unwrap();

        let all: HashSet<ClaimId> = h.service.list_all().await.unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(all, ids);

        let approved = h.service.list_approved().await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, pending[0]);

        let report = PaymentReport::from_claims(approved).unwrap();
        assert_report_consistent(&report);
    }

    #[tokio::test]
    async fn test_overflowing_stored_claim_does_not_break_listing() {
        let huge = Decimal::from(10_000_000_000_000_000_000u64);
        let stored = ClaimBuilder::new().with_hours(huge).with_rate(huge).approved().build();
        let records = Arc::new(MockClaimRecordPort::with_claims(vec![stored]).await);
        let service = ClaimService::new(records, Arc::new(MockDocumentPort::new()), ClaimRules::default());

        let listed = service.list_all().await.unwrap();
        assert_eq!(listed[0].total_payment(), None);

        let err = PaymentReport::from_claims(service.list_approved().await.unwrap()).unwrap_err();
        assert!(matches!(err, ClaimError::PaymentOverflow(_)));
    }

    #[tokio::test]
    async fn test_store_failure_surfaces() {
        let h = harness();
        h.records.set_unavailable(true);

        let err = h
            .service
            .submit(ClaimFixtures::typical(), pdf())
            .await
            .unwrap_err();
        assert!(matches!(err, ClaimError::Store(_)));
        assert!(matches!(h.service.list_pending().await, Err(ClaimError::Store(_))));
    }
}

// ============================================================================
// Totals
// ============================================================================

mod total_tests {
    use super::*;

    #[test]
    fn test_total_payment_at_the_decimal_boundary() {
        let at_max = ClaimBuilder::new().with_hours(Decimal::MAX).with_rate(dec!(1)).build();
        assert_eq!(compute_total_payment(&at_max), Some(Decimal::MAX));

        let past_max = ClaimBuilder::new().with_hours(Decimal::MAX).with_rate(dec!(1.5)).build();
        assert_eq!(compute_total_payment(&past_max), None);
    }
}

// ============================================================================
// Properties
// ============================================================================

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_non_positive_figures_never_persist(
        bad in non_positive_decimal_strategy(),
        good in valid_hours_strategy(),
        hours_first in any::<bool>(),
    ) {
        let (hours, rate) = if hours_first { (bad, good) } else { (good, bad) };
        let h = harness();
        let result = runtime().block_on(h.service.submit(ClaimCandidate::new("A", hours, rate), pdf()));

        prop_assert!(matches!(result, Err(ClaimError::Validation(_))));
        prop_assert!(runtime().block_on(h.records.is_empty()));
        prop_assert_eq!(runtime().block_on(h.documents.stored_count()), 0);
    }

    #[test]
    fn prop_acceptable_candidates_are_pending(candidate in acceptable_candidate_strategy()) {
        let h = harness();
        let claim = runtime().block_on(h.service.submit(candidate, pdf())).unwrap();
        prop_assert_eq!(claim.status, ClaimStatus::Pending);
    }

    #[test]
    fn prop_excessive_hours_explained_by_hours(
        hours in excessive_hours_strategy(),
        rate in prop_oneof![valid_rate_strategy(), excessive_rate_strategy()],
    ) {
        let h = harness();
        let claim = runtime()
            .block_on(h.service.submit(ClaimCandidate::new("A", hours, rate), pdf()))
            .unwrap();
        assert_auto_rejected(&claim, "252 hours");
    }

    #[test]
    fn prop_excessive_rate_explained_by_rate(
        hours in valid_hours_strategy(),
        rate in excessive_rate_strategy(),
    ) {
        let h = harness();
        let claim = runtime()
            .block_on(h.service.submit(ClaimCandidate::new("A", hours, rate), pdf()))
            .unwrap();
        assert_auto_rejected(&claim, "hourly rate");
    }

    #[test]
    fn prop_total_payment_matches_integer_cents(
        hundredths_of_hours in 0i64..10_000_000,
        cents in 0i64..10_000_000,
    ) {
        let claim = ClaimBuilder::new()
            .with_hours(Decimal::new(hundredths_of_hours, 2))
            .with_rate(Decimal::new(cents, 2))
            .build();

        // Both figures carry two places, so the product carries four.
        let expected = Decimal::new(hundredths_of_hours * cents, 4);
        prop_assert_eq!(compute_total_payment(&claim), Some(expected));
    }

    #[test]
    fn prop_report_counts_only_approved(statuses in vec(claim_status_strategy(), 0..8)) {
        let claims: Vec<_> = statuses
            .iter()
            .map(|status| ClaimBuilder::new().with_status(*status).build())
            .collect();

        let report = PaymentReport::from_claims(claims).unwrap();

        let approved = statuses.iter().filter(|s| **s == ClaimStatus::Approved).count();
        prop_assert_eq!(report.lines.len(), approved);
        prop_assert_eq!(report.grand_total, Decimal::from(approved as u64) * dec!(500));
        assert_report_consistent(&report);
    }
}
