//! Test Utilities Crate
//!
//! Shared test infrastructure for the lecturer claims workspace.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for claims, attachments and lecturers
//! - `builders`: Builder patterns for test data construction
//! - `database`: PostgreSQL test containers with the schema applied
//! - `assertions`: Assertion helpers for claims and payment reports
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
