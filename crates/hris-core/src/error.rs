//! Domain errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Employee not found")]
    NotFound,

    #[error("Employee has been deleted")]
    Deleted,

    #[error("Forbidden")]
    Forbidden,

    #[error("Email already exists: {0}")]
    Duplicate(String),

    #[error("Employee id already exists: {0}")]
    DuplicateId(String),

    #[error("Photo exceeds the 5 MiB limit")]
    PhotoTooLarge,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User account is not active")]
    UserNotActive,

    #[error("You've already checked in today")]
    AlreadyCheckedIn,

    #[error("No check-in record found for today")]
    NoCheckInToday,

    #[error("You have already checked out today")]
    AlreadyCheckedOut,

    #[error("Operation timed out")]
    Timeout,

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        fields.sort_unstable();
        DomainError::BadRequest(format!(
            "invalid data input, please check: {}",
            fields.join(", ")
        ))
    }
}
