//! Password hashing with Argon2
//!
//! New hashes are Argon2id PHC strings. Hashes written by the previous
//! bcrypt-based service (`$2a$`, `$2b$`, `$2y$`) are still accepted by
//! [`PasswordService::verify`].

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use hris_shared::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Password must be at least {0} characters")]
    TooShort(usize),
    #[error("Password must be at most {0} characters")]
    TooLong(usize),
}

pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordError::HashError(e.to_string()))
    }

    /// Constant-time verification against a stored hash.
    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        if is_bcrypt_hash(hash) {
            return bcrypt::verify(password, hash)
                .map_err(|e| PasswordError::HashError(e.to_string()));
        }
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    pub fn check_policy(password: &str) -> Result<(), PasswordError> {
        let len = password.chars().count();
        if len < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort(MIN_PASSWORD_LENGTH));
        }
        if len > MAX_PASSWORD_LENGTH {
            return Err(PasswordError::TooLong(MAX_PASSWORD_LENGTH));
        }
        Ok(())
    }
}

fn is_bcrypt_hash(hash: &str) -> bool {
    hash.starts_with("$2a$") || hash.starts_with("$2b$") || hash.starts_with("$2y$")
}
