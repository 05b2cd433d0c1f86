//! # HRIS Shared
//! 
//! Shared configuration, telemetry, and runtime services for the HRIS application.

pub mod constants;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;
pub mod clock;
pub mod id;

pub use clock::{Clock, SystemClock};
pub use error::AppError;
pub use id::{IdGenerator, UuidV7Generator};
