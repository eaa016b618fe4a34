//! Domain Adapters
//!
//! PostgreSQL implementations of the domain port traits. Each adapter wraps a
//! repository, converts rows to domain models and translates database errors
//! into `PortError`.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_claims::ClaimRecordPort;
//! use infra_db::adapters::PostgresClaimStore;
//!
//! let records: Arc<dyn ClaimRecordPort> = Arc::new(PostgresClaimStore::new(pool));
//! ```

pub mod claims;
pub mod lecturers;

pub use claims::PostgresClaimStore;
pub use lecturers::PostgresLecturerStore;
