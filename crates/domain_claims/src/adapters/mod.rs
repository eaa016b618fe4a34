//! Adapters for Claims Domain Ports
//!
//! # Available Adapters
//!
//! - **LocalDocumentStore**: keeps supporting documents on the local filesystem
//! - **MockClaimRecordPort / MockDocumentPort**: in-memory mocks for testing
//!   (re-exported from the ports module behind the `mock` feature)
//!
//! The PostgreSQL record store lives in `infra_db`.

pub mod local_documents;

pub use local_documents::LocalDocumentStore;
