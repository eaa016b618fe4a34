//! Lecturer record maintenance
//!
//! HR is the only role expected to call these operations; the check belongs
//! to the request boundary.

use std::sync::Arc;

use tracing::info;

use core_kernel::LecturerId;

use crate::error::LecturerError;
use crate::lecturer::{Lecturer, LecturerDetails};
use crate::ports::LecturerPort;
use crate::validation::LecturerValidator;

/// Service for creating and editing lecturer records
#[derive(Clone)]
pub struct LecturerService {
    port: Arc<dyn LecturerPort>,
}

impl LecturerService {
    pub fn new(port: Arc<dyn LecturerPort>) -> Self {
        Self { port }
    }

    /// Validates and stores a new lecturer
    ///
    /// # Errors
    ///
    /// * `LecturerError::Validation` - details are invalid
    /// * `LecturerError::DuplicateEmail` - the email is already registered
    pub async fn register(&self, details: LecturerDetails) -> Result<Lecturer, LecturerError> {
        let details = details.normalized();
        LecturerValidator::validate(&details).into_result()?;

        if self.port.find_by_email(&details.email).await?.is_some() {
            return Err(LecturerError::DuplicateEmail(details.email));
        }

        let lecturer = Lecturer::new(details);
        self.port.create(&lecturer).await?;
        info!(lecturer_id = %lecturer.id, "Lecturer registered");
        Ok(lecturer)
    }

    /// Replaces a lecturer's details
    pub async fn update(&self, id: LecturerId, details: LecturerDetails) -> Result<Lecturer, LecturerError> {
        let details = details.normalized();
        LecturerValidator::validate(&details).into_result()?;

        let mut lecturer = self.get(id).await?;
        if let Some(other) = self.port.find_by_email(&details.email).await? {
            if other.id != id {
                return Err(LecturerError::DuplicateEmail(details.email));
            }
        }

        lecturer.apply(details);
        self.port.update(&lecturer).await.map_err(|e| {
            if e.is_not_found() {
                LecturerError::NotFound(id)
            } else {
                LecturerError::Store(e)
            }
        })?;
        info!(lecturer_id = %id, "Lecturer updated");
        Ok(lecturer)
    }

    pub async fn get(&self, id: LecturerId) -> Result<Lecturer, LecturerError> {
        self.port.get(id).await?.ok_or(LecturerError::NotFound(id))
    }

    pub async fn list(&self) -> Result<Vec<Lecturer>, LecturerError> {
        Ok(self.port.list().await?)
    }

    pub async fn remove(&self, id: LecturerId) -> Result<(), LecturerError> {
        self.port.delete(id).await.map_err(|e| {
            if e.is_not_found() {
                LecturerError::NotFound(id)
            } else {
                LecturerError::Store(e)
            }
        })?;
        info!(lecturer_id = %id, "Lecturer removed");
        Ok(())
    }
}
