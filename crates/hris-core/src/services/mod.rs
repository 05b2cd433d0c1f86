//! Domain services (business logic)

pub mod attendance_service;
pub mod auth_service;
pub mod credentials;
pub mod employee_service;

pub use attendance_service::AttendanceService;
pub use auth_service::{AuthService, LoginResult};
pub use credentials::{Argon2Hasher, PasswordHasher, Principal, TokenIssuer};
pub use employee_service::{EmployeeService, EmployeeUpdate, NewEmployee};

use std::future::Future;
use std::time::Duration;

use crate::error::DomainError;

/// Run one whole operation under `deadline`. Elapsed deadlines become `Timeout`.
pub(crate) async fn within<T, F>(deadline: Duration, fut: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    tokio::time::timeout(deadline, fut)
        .await
        .map_err(|_| DomainError::Timeout)?
}
