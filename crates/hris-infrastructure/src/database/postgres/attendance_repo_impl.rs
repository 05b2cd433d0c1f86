// ============================================================================
// HRIS Infrastructure - PostgreSQL Attendance Repository
// File: crates/hris-infrastructure/src/database/postgres/attendance_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;

use hris_core::domain::{Attendance, DayBucket};
use hris_core::error::DomainError;
use hris_core::repositories::AttendanceRepository;

use super::is_unique_violation;

pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AttendanceRow {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub location: String,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub is_late: bool,
    pub date: NaiveDate,
}

impl From<AttendanceRow> for Attendance {
    fn from(row: AttendanceRow) -> Self {
        Attendance {
            id: row.id,
            employee_id: row.employee_id,
            employee_name: row.employee_name,
            location: row.location,
            check_in: row.check_in,
            check_out: row.check_out,
            is_late: row.is_late,
            date: DayBucket::new(row.date),
        }
    }
}

#[async_trait]
impl AttendanceRepository for PgAttendanceRepository {
    async fn save(&self, attendance: &Attendance) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO attendances (
                id, employee_id, employee_name, location,
                check_in, check_out, is_late, date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&attendance.id)
        .bind(&attendance.employee_id)
        .bind(&attendance.employee_name)
        .bind(&attendance.location)
        .bind(attendance.check_in)
        .bind(attendance.check_out)
        .bind(attendance.is_late)
        .bind(attendance.date.date())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::AlreadyCheckedIn
            } else {
                error!("Database error saving attendance: {}", e);
                DomainError::DatabaseError(e.to_string())
            }
        })?;

        Ok(())
    }

    async fn update(&self, attendance: &Attendance) -> Result<(), DomainError> {
        // Only an open record may be closed
        let result = sqlx::query(
            r#"
            UPDATE attendances
            SET check_out = $2
            WHERE id = $1 AND check_out IS NULL
            "#,
        )
        .bind(&attendance.id)
        .bind(attendance.check_out)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error updating attendance: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AlreadyCheckedOut);
        }
        Ok(())
    }

    async fn find_by_employee_and_date(
        &self,
        employee_id: &str,
        date: DayBucket,
    ) -> Result<Option<Attendance>, DomainError> {
        let row: Option<AttendanceRow> = sqlx::query_as(
            r#"
            SELECT
                id, employee_id, employee_name, location,
                check_in, check_out, is_late, date
            FROM attendances
            WHERE employee_id = $1 AND date = $2
            "#,
        )
        .bind(employee_id)
        .bind(date.date())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding attendance: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(Attendance::from))
    }
}
