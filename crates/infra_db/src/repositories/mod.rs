//! Repository implementations
//!
//! Repositories own the SQL for one table each and return plain row types.
//! Queries are checked at runtime so the crate builds without a live
//! database.

pub mod claims;
pub mod lecturers;

pub use claims::{ClaimRow, ClaimsRepository};
pub use lecturers::{LecturerRow, LecturersRepository};
