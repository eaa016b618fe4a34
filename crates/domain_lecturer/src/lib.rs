//! Lecturer Records Domain
//!
//! Reference data about lecturers (name, email, contact number) that HR
//! keeps up to date. Lecturers have no lifecycle of their own; claims refer
//! to them by name.
//!
//! # Example
//!
//! ```rust
//! use domain_lecturer::LecturerDetails;
//! use domain_lecturer::validation::LecturerValidator;
//!
//! let details = LecturerDetails::new("Thandi Mokoena", "thandi@example.com")
//!     .with_contact_number("+27 21 555 0101");
//! assert!(LecturerValidator::validate(&details).is_valid);
//! ```

pub mod lecturer;
pub mod validation;
pub mod ports;
pub mod service;
pub mod error;

pub use lecturer::{Lecturer, LecturerDetails};
pub use validation::{LecturerValidator, ValidationResult};
pub use ports::LecturerPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockLecturerPort;
pub use service::LecturerService;
pub use error::LecturerError;
