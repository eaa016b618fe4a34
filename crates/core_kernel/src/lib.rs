//! Core Kernel - Foundational types shared by the lecturer claims workspace
//!
//! This crate provides the building blocks used by every domain and adapter crate:
//! - Strongly-typed identifiers for claims and lecturers
//! - The port error type and marker traits for the ports and adapters pattern

pub mod identifiers;
pub mod ports;

pub use identifiers::{ClaimId, LecturerId};
pub use ports::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
