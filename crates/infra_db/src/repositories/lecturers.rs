//! Lecturers repository implementation

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

const LECTURER_COLUMNS: &str = "lecturer_id, name, email, contact_number, created_at, updated_at";

/// Repository for lecturer records
#[derive(Debug, Clone)]
pub struct LecturersRepository {
    pool: PgPool,
}

impl LecturersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, row: &LecturerRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO lecturers (lecturer_id, name, email, contact_number, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(row.lecturer_id)
        .bind(&row.name)
        .bind(&row.email)
        .bind(&row.contact_number)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_by_id(&self, lecturer_id: Uuid) -> Result<Option<LecturerRow>, DatabaseError> {
        let sql = format!("SELECT {LECTURER_COLUMNS} FROM lecturers WHERE lecturer_id = $1");
        let row = sqlx::query_as::<_, LecturerRow>(&sql)
            .bind(lecturer_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<LecturerRow>, DatabaseError> {
        let sql = format!("SELECT {LECTURER_COLUMNS} FROM lecturers WHERE email = $1");
        let row = sqlx::query_as::<_, LecturerRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update(&self, row: &LecturerRow) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE lecturers
            SET name = $2, email = $3, contact_number = $4, updated_at = $5
            WHERE lecturer_id = $1
            "#,
        )
        .bind(row.lecturer_id)
        .bind(&row.name)
        .bind(&row.email)
        .bind(&row.contact_number)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Lecturer", row.lecturer_id));
        }
        Ok(())
    }

    pub async fn delete(&self, lecturer_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM lecturers WHERE lecturer_id = $1")
            .bind(lecturer_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Lecturer", lecturer_id));
        }
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<LecturerRow>, DatabaseError> {
        let sql = format!("SELECT {LECTURER_COLUMNS} FROM lecturers ORDER BY name, lecturer_id");
        let rows = sqlx::query_as::<_, LecturerRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

/// Database row for a lecturer
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct LecturerRow {
    pub lecturer_id: Uuid,
    pub name: String,
    pub email: String,
    pub contact_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
