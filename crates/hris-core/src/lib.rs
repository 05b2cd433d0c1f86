//! # HRIS Core
//! 
//! Domain entities, use-case services, and repository traits for the
//! employee-management backend.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
