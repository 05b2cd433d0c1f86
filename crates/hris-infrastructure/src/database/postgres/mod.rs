//! PostgreSQL repository implementations

pub mod attendance_repo_impl;
pub mod employee_repo_impl;

pub use attendance_repo_impl::PgAttendanceRepository;
pub use employee_repo_impl::PgEmployeeRepository;

/// True when the error is a unique-constraint violation.
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

/// Name of the unique constraint the error violated, if any.
pub(crate) fn violated_unique_constraint(e: &sqlx::Error) -> Option<&str> {
    e.as_database_error()
        .filter(|db| db.is_unique_violation())
        .and_then(|db| db.constraint())
}
