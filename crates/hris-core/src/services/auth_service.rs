// ============================================================================
// HRIS Core - Authentication Service
// File: crates/hris-core/src/services/auth_service.rs
// ============================================================================
//! Credential verification and bearer token issuance

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use hris_shared::utils::{mask_email, normalize_email};

use super::credentials::{PasswordHasher, Principal, TokenIssuer};
use super::within;
use crate::domain::Role;
use crate::error::DomainError;
use crate::repositories::EmployeeRepository;

/// Authentication service for login and token verification
pub struct AuthService {
    employee_repo: Arc<dyn EmployeeRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    timeout: Duration,
}

impl AuthService {
    pub fn new(
        employee_repo: Arc<dyn EmployeeRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        timeout: Duration,
    ) -> Self {
        Self {
            employee_repo,
            hasher,
            tokens,
            timeout,
        }
    }

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, DomainError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::BadRequest("email and password are required".into()));
        }
        info!("Login attempt for email: {}", mask_email(&email));

        let (employee, password_valid) = within(self.timeout, async {
            // 1. Find employee by email
            let employee = self
                .employee_repo
                .find_by_email(&email)
                .await?
                .ok_or_else(|| {
                    warn!("Login failed: email not found: {}", mask_email(&email));
                    DomainError::InvalidCredentials
                })?;

            // 2. Verify password
            let password_valid = self
                .hasher
                .verify(password, &employee.password_hash)
                .await
                .map_err(|e| {
                    error!(employee_id = %employee.id, "Stored password hash unusable: {}", e);
                    DomainError::InvalidCredentials
                })?;
            Ok::<_, DomainError>((employee, password_valid))
        })
        .await?;
        if !password_valid {
            warn!("Login failed: invalid password for: {}", mask_email(&email));
            return Err(DomainError::InvalidCredentials);
        }

        // 3. Only active employees may log in
        if !employee.is_active() {
            warn!(
                "Login failed: employee not active (status: {})",
                employee.status.as_str()
            );
            return Err(DomainError::UserNotActive);
        }

        // 4. Issue token
        let access_token = self
            .tokens
            .generate(&employee.id, &employee.email, employee.role)?;

        info!(employee_id = %employee.id, "Login successful");
        Ok(LoginResult {
            access_token,
            employee_id: employee.id,
            role: employee.role,
        })
    }

    /// Resolve a bearer token to the calling principal.
    pub fn authenticate(&self, token: &str) -> Result<Principal, DomainError> {
        self.tokens.parse(token).map_err(|e| {
            warn!("Rejected bearer token: {}", e);
            DomainError::InvalidCredentials
        })
    }
}

/// Result of successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    pub access_token: String,
    pub employee_id: String,
    pub role: Role,
}
