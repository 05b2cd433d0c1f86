//! Employee repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Employee, Lifecycle};
use crate::error::DomainError;

/// Persistence for employees. Every read except `lifecycle` skips
/// soft-deleted rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Insert a new record. A live record with the same email yields `Duplicate`.
    async fn create(&self, employee: &Employee) -> Result<(), DomainError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Employee>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DomainError>;
    async fn find_all(&self) -> Result<Vec<Employee>, DomainError>;
    /// Deletion state of a record, including deleted ones. `None` if it never existed.
    async fn lifecycle(&self, id: &str) -> Result<Option<Lifecycle>, DomainError>;
    /// Overwrite a live record. Returns the number of rows touched.
    async fn update(&self, employee: &Employee) -> Result<u64, DomainError>;
    /// Mark a live record deleted. Returns the number of rows touched.
    async fn soft_delete(&self, id: &str, at: DateTime<Utc>) -> Result<u64, DomainError>;
}
