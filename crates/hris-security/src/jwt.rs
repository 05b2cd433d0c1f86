//! JWT token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub uid: String,
    pub email: String,
    pub role: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl_seconds: i64,
}

impl JwtService {
    pub fn new(secret: &str, issuer: impl Into<String>, ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            ttl_seconds,
        }
    }

    pub fn generate(&self, user_id: &str, email: &str, role: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            uid: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_seconds)).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::ValidationError(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_validate() {
        let jwt = JwtService::new("secret", "hris", 3600);
        let token = jwt.generate("emp-1", "budi@shop.id", "staff").unwrap();
        let claims = jwt.validate(&token).unwrap();
        assert_eq!(claims.uid, "emp-1");
        assert_eq!(claims.email, "budi@shop.id");
        assert_eq!(claims.role, "staff");
        assert_eq!(claims.iss, "hris");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_rejects_foreign_secret() {
        let issuer = JwtService::new("secret", "hris", 3600);
        let other = JwtService::new("another-secret", "hris", 3600);
        let token = issuer.generate("emp-1", "budi@shop.id", "staff").unwrap();
        assert!(matches!(other.validate(&token), Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_rejects_foreign_issuer() {
        let issuer = JwtService::new("secret", "someone-else", 3600);
        let verifier = JwtService::new("secret", "hris", 3600);
        let token = issuer.generate("emp-1", "budi@shop.id", "staff").unwrap();
        assert!(verifier.validate(&token).is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let jwt = JwtService::new("secret", "hris", -3600);
        let token = jwt.generate("emp-1", "budi@shop.id", "staff").unwrap();
        assert!(matches!(jwt.validate(&token), Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_rejects_tampered_token() {
        let jwt = JwtService::new("secret", "hris", 3600);
        let mut token = jwt.generate("emp-1", "budi@shop.id", "staff").unwrap();
        token.push('x');
        assert!(jwt.validate(&token).is_err());
    }
}
