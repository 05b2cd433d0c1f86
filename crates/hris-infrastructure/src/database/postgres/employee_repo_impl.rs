// ============================================================================
// HRIS Infrastructure - PostgreSQL Employee Repository
// File: crates/hris-infrastructure/src/database/postgres/employee_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use hris_core::domain::{Employee, EmployeeStatus, Lifecycle, PhotoMime, PhotoRef, Role};
use hris_core::error::DomainError;
use hris_core::repositories::EmployeeRepository;

use super::violated_unique_constraint;

const EMPLOYEE_COLUMNS: &str = r#"
    id, name, email, password_hash, role, position, salary, status,
    address, district, city, province, phone, photo_url, photo_mime,
    birth_date, created_at, updated_at, deleted_at
"#;

pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct EmployeeRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub position: String,
    pub salary: i64,
    pub status: String,
    pub address: String,
    pub district: String,
    pub city: String,
    pub province: String,
    pub phone: String,
    pub photo_url: Option<String>,
    pub photo_mime: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = DomainError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role).ok_or_else(|| {
            DomainError::DatabaseError(format!("employee {} has unknown role '{}'", row.id, row.role))
        })?;
        let status = EmployeeStatus::from_str(&row.status).ok_or_else(|| {
            DomainError::DatabaseError(format!(
                "employee {} has unknown status '{}'",
                row.id, row.status
            ))
        })?;
        let photo = match (row.photo_url, row.photo_mime) {
            (Some(url), Some(mime)) => Some(PhotoRef::new(url, PhotoMime::parse(&mime)?)),
            _ => None,
        };

        Ok(Employee {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role,
            position: row.position,
            salary: row.salary,
            status,
            address: row.address,
            district: row.district,
            city: row.city,
            province: row.province,
            phone: row.phone,
            photo,
            birth_date: row.birth_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
            lifecycle: Lifecycle::from_deleted_at(row.deleted_at),
        })
    }
}

const PRIMARY_KEY: &str = "employees_pkey";

/// Translate a unique violation on `employees` into the matching conflict.
/// Only the live-email index and the primary key are unique.
fn conflict(constraint: &str, employee: &Employee) -> DomainError {
    if constraint == PRIMARY_KEY {
        DomainError::DuplicateId(employee.id.clone())
    } else {
        DomainError::Duplicate(employee.email.clone())
    }
}

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", action, e);
    DomainError::DatabaseError(e.to_string())
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn create(&self, employee: &Employee) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO employees (
                id, name, email, password_hash, role, position, salary, status,
                address, district, city, province, phone, photo_url, photo_mime,
                birth_date, created_at, updated_at, deleted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, NULL)
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.password_hash)
        .bind(employee.role.as_str())
        .bind(&employee.position)
        .bind(employee.salary)
        .bind(employee.status.as_str())
        .bind(&employee.address)
        .bind(&employee.district)
        .bind(&employee.city)
        .bind(&employee.province)
        .bind(&employee.phone)
        .bind(employee.photo.as_ref().map(|p| p.url.as_str()))
        .bind(employee.photo.as_ref().map(|p| p.mime.as_str()))
        .bind(employee.birth_date)
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            match violated_unique_constraint(&e) {
                Some(constraint) => conflict(constraint, employee),
                None => db_error("creating employee", e),
            }
        })?;

        info!("Employee row inserted: {}", employee.id);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Employee>, DomainError> {
        let sql = format!(
            "SELECT {} FROM employees WHERE id = $1 AND deleted_at IS NULL",
            EMPLOYEE_COLUMNS
        );
        let row: Option<EmployeeRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("finding employee by id", e))?;

        row.map(Employee::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DomainError> {
        let sql = format!(
            "SELECT {} FROM employees WHERE LOWER(email) = LOWER($1) AND deleted_at IS NULL",
            EMPLOYEE_COLUMNS
        );
        let row: Option<EmployeeRow> = sqlx::query_as(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("finding employee by email", e))?;

        row.map(Employee::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Employee>, DomainError> {
        let sql = format!(
            "SELECT {} FROM employees WHERE deleted_at IS NULL ORDER BY created_at, id",
            EMPLOYEE_COLUMNS
        );
        let rows: Vec<EmployeeRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("listing employees", e))?;

        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn lifecycle(&self, id: &str) -> Result<Option<Lifecycle>, DomainError> {
        let row: Option<(Option<DateTime<Utc>>,)> =
            sqlx::query_as("SELECT deleted_at FROM employees WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("probing employee lifecycle", e))?;

        Ok(row.map(|(deleted_at,)| Lifecycle::from_deleted_at(deleted_at)))
    }

    async fn update(&self, employee: &Employee) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET
                name = $2,
                email = $3,
                password_hash = $4,
                role = $5,
                position = $6,
                salary = $7,
                status = $8,
                address = $9,
                district = $10,
                city = $11,
                province = $12,
                phone = $13,
                photo_url = $14,
                photo_mime = $15,
                birth_date = $16,
                updated_at = $17
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.password_hash)
        .bind(employee.role.as_str())
        .bind(&employee.position)
        .bind(employee.salary)
        .bind(employee.status.as_str())
        .bind(&employee.address)
        .bind(&employee.district)
        .bind(&employee.city)
        .bind(&employee.province)
        .bind(&employee.phone)
        .bind(employee.photo.as_ref().map(|p| p.url.as_str()))
        .bind(employee.photo.as_ref().map(|p| p.mime.as_str()))
        .bind(employee.birth_date)
        .bind(employee.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            match violated_unique_constraint(&e) {
                Some(constraint) => conflict(constraint, employee),
                None => db_error("updating employee", e),
            }
        })?;

        Ok(result.rows_affected())
    }

    async fn soft_delete(&self, id: &str, at: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET deleted_at = $2, updated_at = $2
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("deleting employee", e))?;

        Ok(result.rows_affected())
    }
}
