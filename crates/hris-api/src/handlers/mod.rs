//! HTTP handlers

pub mod attendance;
pub mod auth;
pub mod employees;
pub mod health;
