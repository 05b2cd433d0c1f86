// ============================================================================
// HRIS Core - Attendance Service
// File: crates/hris-core/src/services/attendance_service.rs
// ============================================================================
//! Daily check-in/check-out state machine

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use hris_shared::{Clock, IdGenerator};

use super::within;
use crate::domain::{Attendance, AttendancePolicy};
use crate::error::DomainError;
use crate::repositories::{AttendanceRepository, EmployeeRepository};

/// Check-in/check-out per employee per day bucket.
///
/// `NoRecord -> CheckedIn -> CheckedOut`; the last state is terminal for the day.
pub struct AttendanceService {
    attendance_repo: Arc<dyn AttendanceRepository>,
    employee_repo: Arc<dyn EmployeeRepository>,
    policy: AttendancePolicy,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    timeout: Duration,
}

impl AttendanceService {
    pub fn new(
        attendance_repo: Arc<dyn AttendanceRepository>,
        employee_repo: Arc<dyn EmployeeRepository>,
        policy: AttendancePolicy,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        timeout: Duration,
    ) -> Self {
        Self {
            attendance_repo,
            employee_repo,
            policy,
            clock,
            ids,
            timeout,
        }
    }

    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    /// Open today's record for `employee_id`.
    pub async fn check_in(&self, employee_id: &str, location: &str) -> Result<Attendance, DomainError> {
        within(self.timeout, async move {
            let employee = self
                .employee_repo
                .find_by_id(employee_id)
                .await?
                .ok_or(DomainError::NotFound)?;

            let now = self.clock.now();
            let today = self.policy.day_bucket(now);

            let existing = self
                .attendance_repo
                .find_by_employee_and_date(&employee.id, today)
                .await?;
            if existing.is_some() {
                warn!(employee_id = %employee.id, date = %today, "Check-in rejected: already checked in");
                return Err(DomainError::AlreadyCheckedIn);
            }

            let attendance = Attendance::check_in(
                self.ids.new_id(),
                employee.id,
                employee.name,
                location.to_string(),
                now,
                &self.policy,
            );

            // A racing duplicate is rejected by the store's (employee, date) key
            self.attendance_repo.save(&attendance).await?;

            info!(
                attendance_id = %attendance.id,
                employee_id = %attendance.employee_id,
                date = %attendance.date,
                is_late = attendance.is_late,
                "Checked in"
            );
            Ok(attendance)
        })
        .await
    }

    /// Close today's record for `employee_id`.
    pub async fn check_out(&self, employee_id: &str) -> Result<Attendance, DomainError> {
        within(self.timeout, async move {
            let now = self.clock.now();
            let today = self.policy.day_bucket(now);

            let open = self
                .attendance_repo
                .find_by_employee_and_date(employee_id, today)
                .await?
                .ok_or_else(|| {
                    warn!(employee_id = %employee_id, date = %today, "Check-out rejected: no check-in");
                    DomainError::NoCheckInToday
                })?;

            let closed = open.check_out(now)?;
            self.attendance_repo.update(&closed).await?;

            info!(attendance_id = %closed.id, employee_id = %employee_id, "Checked out");
            Ok(closed)
        })
        .await
    }

    /// Today's record for `employee_id`, if any.
    pub async fn today(&self, employee_id: &str) -> Result<Option<Attendance>, DomainError> {
        let today = self.policy.day_bucket(self.clock.now());
        within(
            self.timeout,
            self.attendance_repo.find_by_employee_and_date(employee_id, today),
        )
        .await
    }
}
