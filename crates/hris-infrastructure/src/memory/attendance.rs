use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use hris_core::domain::{Attendance, DayBucket};
use hris_core::error::DomainError;
use hris_core::repositories::AttendanceRepository;

/// Keyed by (employee id, day bucket), like the unique index in PostgreSQL.
#[derive(Default)]
pub struct InMemoryAttendanceRepository {
    rows: RwLock<HashMap<(String, DayBucket), Attendance>>,
}

impl InMemoryAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendanceRepository {
    async fn save(&self, attendance: &Attendance) -> Result<(), DomainError> {
        let key = (attendance.employee_id.clone(), attendance.date);
        let mut rows = self.rows.write().await;
        if rows.contains_key(&key) {
            return Err(DomainError::AlreadyCheckedIn);
        }
        rows.insert(key, attendance.clone());
        Ok(())
    }

    async fn update(&self, attendance: &Attendance) -> Result<(), DomainError> {
        let key = (attendance.employee_id.clone(), attendance.date);
        let mut rows = self.rows.write().await;
        match rows.get_mut(&key) {
            Some(current) if current.id == attendance.id && current.check_out.is_none() => {
                current.check_out = attendance.check_out;
                Ok(())
            }
            Some(current) if current.id == attendance.id => Err(DomainError::AlreadyCheckedOut),
            _ => Err(DomainError::NoCheckInToday),
        }
    }

    async fn find_by_employee_and_date(
        &self,
        employee_id: &str,
        date: DayBucket,
    ) -> Result<Option<Attendance>, DomainError> {
        let rows = self.rows.read().await;
        Ok(rows.get(&(employee_id.to_string(), date)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone, Utc};
    use hris_core::domain::AttendancePolicy;

    fn record(id: &str) -> Attendance {
        let policy = AttendancePolicy::new(
            chrono_tz::Asia::Jakarta,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        );
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 1, 0, 0).unwrap();
        Attendance::check_in(id.into(), "e-1".into(), "Siti".into(), "HQ".into(), at, &policy)
    }

    #[tokio::test]
    async fn test_one_record_per_employee_and_day() {
        let repo = InMemoryAttendanceRepository::new();
        repo.save(&record("a-1")).await.unwrap();
        assert_eq!(repo.save(&record("a-2")).await, Err(DomainError::AlreadyCheckedIn));
    }

    #[tokio::test]
    async fn test_check_out_is_written_once() {
        let repo = InMemoryAttendanceRepository::new();
        let open = record("a-1");
        repo.save(&open).await.unwrap();

        let closed = open.check_out(Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()).unwrap();
        repo.update(&closed).await.unwrap();
        assert_eq!(repo.update(&closed).await, Err(DomainError::AlreadyCheckedOut));

        let stored = repo
            .find_by_employee_and_date("e-1", closed.date)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.check_out, closed.check_out);
    }
}
