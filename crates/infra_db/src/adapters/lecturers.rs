//! PostgreSQL Lecturer Store

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{DomainPort, LecturerId, PortError};
use domain_lecturer::{Lecturer, LecturerPort};

use crate::repositories::lecturers::{LecturerRow, LecturersRepository};

/// PostgreSQL-backed implementation of [`LecturerPort`]
///
/// The unique index on `email` backs up the duplicate check the service
/// makes; a race between two registrations surfaces as `PortError::Conflict`.
#[derive(Debug, Clone)]
pub struct PostgresLecturerStore {
    repository: LecturersRepository,
}

impl PostgresLecturerStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: LecturersRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresLecturerStore {}

#[async_trait]
impl LecturerPort for PostgresLecturerStore {
    #[instrument(skip(self, lecturer), fields(lecturer_id = %lecturer.id))]
    async fn create(&self, lecturer: &Lecturer) -> Result<(), PortError> {
        Ok(self.repository.insert(&lecturer_to_row(lecturer)).await?)
    }

    #[instrument(skip(self), fields(lecturer_id = %id))]
    async fn get(&self, id: LecturerId) -> Result<Option<Lecturer>, PortError> {
        Ok(self.repository.get_by_id(id.into()).await?.map(row_to_lecturer))
    }

    #[instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Lecturer>, PortError> {
        Ok(self.repository.find_by_email(email).await?.map(row_to_lecturer))
    }

    #[instrument(skip(self, lecturer), fields(lecturer_id = %lecturer.id))]
    async fn update(&self, lecturer: &Lecturer) -> Result<(), PortError> {
        Ok(self.repository.update(&lecturer_to_row(lecturer)).await?)
    }

    #[instrument(skip(self), fields(lecturer_id = %id))]
    async fn delete(&self, id: LecturerId) -> Result<(), PortError> {
        Ok(self.repository.delete(id.into()).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Lecturer>, PortError> {
        Ok(self
            .repository
            .list()
            .await?
            .into_iter()
            .map(row_to_lecturer)
            .collect())
    }
}

fn lecturer_to_row(lecturer: &Lecturer) -> LecturerRow {
    LecturerRow {
        lecturer_id: lecturer.id.into(),
        name: lecturer.name.clone(),
        email: lecturer.email.clone(),
        contact_number: lecturer.contact_number.clone(),
        created_at: lecturer.created_at,
        updated_at: lecturer.updated_at,
    }
}

fn row_to_lecturer(row: LecturerRow) -> Lecturer {
    Lecturer {
        id: LecturerId::from_uuid(row.lecturer_id),
        name: row.name,
        email: row.email,
        contact_number: row.contact_number,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_lecturer::LecturerDetails;

    #[test]
    fn test_row_conversion_roundtrip() {
        let lecturer = Lecturer::new(
            LecturerDetails::new("Naledi", "naledi@example.com").with_contact_number("021 555 0101"),
        );
        assert_eq!(row_to_lecturer(lecturer_to_row(&lecturer)), lecturer);
    }
}
