//! # HRIS Security
//! 
//! Security utilities: password hashing and JWT issuance.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtService};
pub use password::PasswordService;
