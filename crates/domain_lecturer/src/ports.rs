//! Lecturer Domain Ports
//!
//! `LecturerPort` is implemented by the PostgreSQL adapter in `infra_db` and
//! by the in-memory [`mock::MockLecturerPort`] used in tests.

use async_trait::async_trait;

use core_kernel::{DomainPort, LecturerId, PortError};

use crate::lecturer::{Lecturer, LecturerDetails};

/// Storage for lecturer records
#[async_trait]
pub trait LecturerPort: DomainPort {
    /// Persists a new record
    async fn create(&self, lecturer: &Lecturer) -> Result<(), PortError>;

    /// Looks up a record, `None` if absent
    async fn get(&self, id: LecturerId) -> Result<Option<Lecturer>, PortError>;

    /// Finds a record by its (normalized) email address
    async fn find_by_email(&self, email: &str) -> Result<Option<Lecturer>, PortError>;

    /// Overwrites an existing record; `PortError::NotFound` if it is gone
    async fn update(&self, lecturer: &Lecturer) -> Result<(), PortError>;

    /// Removes a record; `PortError::NotFound` if there was nothing to remove
    async fn delete(&self, id: LecturerId) -> Result<(), PortError>;

    /// All records ordered by name
    async fn list(&self) -> Result<Vec<Lecturer>, PortError>;
}

/// In-memory implementation of LecturerPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    #[derive(Debug, Default)]
    pub struct MockLecturerPort {
        lecturers: Arc<RwLock<HashMap<LecturerId, Lecturer>>>,
    }

    impl MockLecturerPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with lecturers for testing
        pub async fn with_lecturers(lecturers: Vec<Lecturer>) -> Self {
            let port = Self::new();
            for lecturer in lecturers {
                port.lecturers.write().await.insert(lecturer.id, lecturer);
            }
            port
        }
    }

    impl DomainPort for MockLecturerPort {}

    #[async_trait]
    impl LecturerPort for MockLecturerPort {
        async fn create(&self, lecturer: &Lecturer) -> Result<(), PortError> {
            let mut lecturers = self.lecturers.write().await;
            if lecturers.contains_key(&lecturer.id) {
                return Err(PortError::Conflict {
                    message: format!("Lecturer {} already exists", lecturer.id),
                });
            }
            lecturers.insert(lecturer.id, lecturer.clone());
            Ok(())
        }

        async fn get(&self, id: LecturerId) -> Result<Option<Lecturer>, PortError> {
            Ok(self.lecturers.read().await.get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Lecturer>, PortError> {
            Ok(self
                .lecturers
                .read()
                .await
                .values()
                .find(|l| l.email == email)
                .cloned())
        }

        async fn update(&self, lecturer: &Lecturer) -> Result<(), PortError> {
            let mut lecturers = self.lecturers.write().await;
            let slot = lecturers
                .get_mut(&lecturer.id)
                .ok_or_else(|| PortError::not_found("Lecturer", lecturer.id))?;
            *slot = lecturer.clone();
            Ok(())
        }

        async fn delete(&self, id: LecturerId) -> Result<(), PortError> {
            self.lecturers
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Lecturer", id))
        }

        async fn list(&self) -> Result<Vec<Lecturer>, PortError> {
            let mut lecturers: Vec<Lecturer> = self.lecturers.read().await.values().cloned().collect();
            lecturers.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
            Ok(lecturers)
        }
    }
}
