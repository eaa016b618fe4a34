//! Claims repository implementation

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str = "claim_id, lecturer_name, hours_worked, hourly_rate, notes, \
                             status, document_path, submitted_at";

/// Repository for claim records
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a claim record
    pub async fn insert(&self, row: &ClaimRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO claims (
                claim_id, lecturer_name, hours_worked, hourly_rate, notes,
                status, document_path, submitted_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
            "#,
        )
        .bind(row.claim_id)
        .bind(&row.lecturer_name)
        .bind(row.hours_worked)
        .bind(row.hourly_rate)
        .bind(&row.notes)
        .bind(&row.status)
        .bind(&row.document_path)
        .bind(row.submitted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves a claim, `None` if it does not exist
    pub async fn get_by_id(&self, claim_id: Uuid) -> Result<Option<ClaimRow>, DatabaseError> {
        let sql = format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE claim_id = $1");
        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(claim_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Overwrites the mutable columns of a claim
    pub async fn update(&self, row: &ClaimRow) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE claims
            SET lecturer_name = $2, hours_worked = $3, hourly_rate = $4, notes = $5,
                status = $6, document_path = $7, updated_at = NOW()
            WHERE claim_id = $1
            "#,
        )
        .bind(row.claim_id)
        .bind(&row.lecturer_name)
        .bind(row.hours_worked)
        .bind(row.hourly_rate)
        .bind(&row.notes)
        .bind(&row.status)
        .bind(&row.document_path)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Claim", row.claim_id));
        }
        Ok(())
    }

    pub async fn delete(&self, claim_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM claims WHERE claim_id = $1")
            .bind(claim_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Claim", claim_id));
        }
        Ok(())
    }

    /// Claims in submission order, optionally restricted to one status
    pub async fn list(&self, status: Option<&str>) -> Result<Vec<ClaimRow>, DatabaseError> {
        let sql = format!(
            "SELECT {CLAIM_COLUMNS} FROM claims \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY submitted_at, claim_id"
        );
        let rows = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

/// Database row for a claim
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ClaimRow {
    pub claim_id: Uuid,
    pub lecturer_name: String,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub notes: Option<String>,
    pub status: String,
    pub document_path: String,
    pub submitted_at: DateTime<Utc>,
}
