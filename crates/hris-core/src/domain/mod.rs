//! # HRIS Core - Domain Module
//!
//! Domain entities for the employee-management backend.

pub mod attendance;
pub mod employee;
pub mod photo;

// Re-export all entities and enums
pub use attendance::{Attendance, AttendancePolicy, AttendanceState, DayBucket};
pub use employee::{Employee, EmployeeProfile, EmployeeStatus, Lifecycle, ProfilePatch, Role};
pub use photo::{PhotoMime, PhotoRef, PhotoUpload};
