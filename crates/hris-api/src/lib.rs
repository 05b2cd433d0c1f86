//! # HRIS API
//!
//! HTTP handlers, bearer-token extractor, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
