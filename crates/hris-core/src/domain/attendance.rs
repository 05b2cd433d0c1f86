// ============================================================================
// HRIS Core - Attendance Entity
// File: crates/hris-core/src/domain/attendance.rs
// Description: Daily attendance record, day buckets, and the lateness policy
// ============================================================================

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Calendar day in the application timezone that partitions attendance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayBucket(NaiveDate);

impl DayBucket {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl std::fmt::Display for DayBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Check-in/check-out state of a day's record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceState {
    CheckedIn,
    CheckedOut,
}

/// Attendance entity, one per employee per day bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub location: String,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub is_late: bool,
    pub date: DayBucket,
}

impl Attendance {
    pub fn check_in(
        id: String,
        employee_id: String,
        employee_name: String,
        location: String,
        at: DateTime<Utc>,
        policy: &AttendancePolicy,
    ) -> Self {
        Self {
            id,
            employee_id,
            employee_name,
            location: location.trim().to_string(),
            check_in: at,
            check_out: None,
            is_late: policy.is_late(at),
            date: policy.day_bucket(at),
        }
    }

    pub fn state(&self) -> AttendanceState {
        match self.check_out {
            Some(_) => AttendanceState::CheckedOut,
            None => AttendanceState::CheckedIn,
        }
    }

    /// Close the record. A closed record never changes again.
    pub fn check_out(self, at: DateTime<Utc>) -> Result<Self, DomainError> {
        match self.state() {
            AttendanceState::CheckedOut => Err(DomainError::AlreadyCheckedOut),
            AttendanceState::CheckedIn => Ok(Self {
                check_out: Some(at),
                ..self
            }),
        }
    }
}

/// Office-hours configuration for lateness and day bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendancePolicy {
    timezone: Tz,
    office_start: NaiveTime,
}

impl AttendancePolicy {
    pub fn new(timezone: Tz, office_start: NaiveTime) -> Self {
        Self {
            timezone,
            office_start,
        }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn office_start(&self) -> NaiveTime {
        self.office_start
    }

    pub fn day_bucket(&self, now: DateTime<Utc>) -> DayBucket {
        DayBucket(now.with_timezone(&self.timezone).date_naive())
    }

    /// Office start on the bucket's day, as an instant.
    ///
    /// A start time skipped by a DST gap falls back to reading it as UTC.
    pub fn cutoff(&self, bucket: DayBucket) -> DateTime<Utc> {
        let local = bucket.date().and_time(self.office_start);
        match self.timezone.from_local_datetime(&local).latest() {
            Some(at) => at.with_timezone(&Utc),
            None => Utc.from_utc_datetime(&local),
        }
    }

    /// Late means strictly after the cutoff of the same day.
    pub fn is_late(&self, now: DateTime<Utc>) -> bool {
        now > self.cutoff(self.day_bucket(now))
    }
}
