//! Lecturer Claims Domain
//!
//! This crate implements the claim lifecycle engine: lecturers submit claims
//! for hours worked together with a supporting document, reviewers approve or
//! reject them, and HR reports on the approved ones.
//!
//! # Claim Lifecycle
//!
//! ```text
//! submit ──> Pending ──> Approved
//!   │           └──────> Rejected
//!   └── (exceeds configured ceilings) ──> Rejected
//! ```
//!
//! The engine talks to its collaborators only through the [`ClaimRecordPort`]
//! and [`DocumentPort`] traits; storage and transport live in other crates.

pub mod claim;
pub mod document;
pub mod rules;
pub mod ports;
pub mod service;
pub mod report;
pub mod adapters;
pub mod error;

pub use claim::{compute_total_payment, Claim, ClaimCandidate, ClaimStatus, NewClaim};
pub use document::{Attachment, DocumentPolicy, DocumentRef};
pub use rules::{Assessment, AutoRejection, ClaimRules};
pub use ports::{ClaimRecordPort, DocumentPort};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{MockClaimRecordPort, MockDocumentPort};
pub use service::ClaimService;
pub use report::{PaymentReport, PaymentReportLine};
pub use adapters::LocalDocumentStore;
pub use error::{ClaimError, DocumentError, ValidationError};
