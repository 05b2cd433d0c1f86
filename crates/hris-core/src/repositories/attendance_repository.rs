//! Attendance repository trait (port)

use async_trait::async_trait;

use crate::domain::{Attendance, DayBucket};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Insert a new record. An existing (employee, day) pair yields `AlreadyCheckedIn`.
    async fn save(&self, attendance: &Attendance) -> Result<(), DomainError>;
    /// Persist the check-out of an open record.
    async fn update(&self, attendance: &Attendance) -> Result<(), DomainError>;
    async fn find_by_employee_and_date(
        &self,
        employee_id: &str,
        date: DayBucket,
    ) -> Result<Option<Attendance>, DomainError>;
}
