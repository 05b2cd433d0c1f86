//! In-process adapters with the same constraints as the PostgreSQL schema.
//!
//! Used by the HTTP integration tests and for running the API without
//! external services.

mod attendance;
mod employee;
mod photo;

pub use attendance::InMemoryAttendanceRepository;
pub use employee::InMemoryEmployeeRepository;
pub use photo::{InMemoryPhotoStorage, StoredObject};
