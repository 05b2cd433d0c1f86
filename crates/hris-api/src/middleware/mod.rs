//! Request extractors and middleware

pub mod auth;

pub use auth::AuthUser;
