//! Password hashing and token adapters used by the services

use async_trait::async_trait;
use tracing::error;

use hris_security::jwt::JwtError;
use hris_security::{JwtService, PasswordService};

use crate::domain::Role;
use crate::error::DomainError;

/// Adaptive one-way password hash.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, DomainError>;
    /// Constant-time comparison of `password` against a stored hash.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}

/// Argon2id for new hashes; verifies legacy bcrypt hashes too.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

#[async_trait]
impl PasswordHasher for Argon2Hasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        PasswordService::check_policy(password)
            .map_err(|e| DomainError::BadRequest(e.to_string()))?;

        // CPU-bound; keep it off the async workers
        let password = password.to_string();
        tokio::task::spawn_blocking(move || PasswordService::hash(&password))
            .await
            .map_err(|e| {
                error!("password hash task failed: {}", e);
                DomainError::InternalError(e.to_string())
            })?
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || PasswordService::verify(&password, &hash))
            .await
            .map_err(|e| {
                error!("password verify task failed: {}", e);
                DomainError::InternalError(e.to_string())
            })?
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))
    }
}

/// Authenticated caller, as carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

/// Signs and verifies bearer tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    fn generate(&self, user_id: &str, email: &str, role: Role) -> Result<String, DomainError>;
    /// Fails on tampering, foreign issuer, or expiry.
    fn parse(&self, token: &str) -> Result<Principal, DomainError>;
}

impl TokenIssuer for JwtService {
    fn generate(&self, user_id: &str, email: &str, role: Role) -> Result<String, DomainError> {
        JwtService::generate(self, user_id, email, role.as_str())
            .map_err(|e| DomainError::TokenError(e.to_string()))
    }

    fn parse(&self, token: &str) -> Result<Principal, DomainError> {
        let claims = self.validate(token).map_err(|e| match e {
            JwtError::TokenExpired => DomainError::TokenError("token expired".into()),
            other => DomainError::TokenError(other.to_string()),
        })?;

        let role = Role::from_str(&claims.role)
            .ok_or_else(|| DomainError::TokenError(format!("unknown role '{}'", claims.role)))?;

        Ok(Principal {
            user_id: claims.uid,
            email: claims.email,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_argon2_hasher_roundtrip() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("s3cret-pass").await.unwrap();
        assert!(hasher.verify("s3cret-pass", &hash).await.unwrap());
        assert!(!hasher.verify("other-pass", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_argon2_hasher_enforces_policy() {
        let result = Argon2Hasher.hash("short").await;
        assert!(matches!(result, Err(DomainError::BadRequest(_))));
    }

    #[test]
    fn test_jwt_issuer_roundtrip() {
        let jwt = JwtService::new("test-secret", "hris-test", 3600);
        let token = TokenIssuer::generate(&jwt, "emp-1", "budi@shop.id", Role::Hr).unwrap();
        let principal = TokenIssuer::parse(&jwt, &token).unwrap();
        assert_eq!(
            principal,
            Principal {
                user_id: "emp-1".into(),
                email: "budi@shop.id".into(),
                role: Role::Hr,
            }
        );
    }

    #[test]
    fn test_jwt_issuer_rejects_expired() {
        let jwt = JwtService::new("test-secret", "hris-test", -3600);
        let token = TokenIssuer::generate(&jwt, "emp-1", "budi@shop.id", Role::Staff).unwrap();
        assert!(matches!(
            TokenIssuer::parse(&jwt, &token),
            Err(DomainError::TokenError(_))
        ));
    }
}
