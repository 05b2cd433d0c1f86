//! # HRIS Infrastructure
//!
//! Persistence and object-storage implementations (adapters).

pub mod database;
pub mod memory;
pub mod storage;

pub use database::{create_pool, run_migrations, PgAttendanceRepository, PgEmployeeRepository};
pub use memory::{InMemoryAttendanceRepository, InMemoryEmployeeRepository, InMemoryPhotoStorage};
pub use storage::S3PhotoStorage;
