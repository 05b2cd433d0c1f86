//! Application-wide constants

pub const MAX_PHOTO_SIZE: usize = 5 * 1024 * 1024;
pub const ALLOWED_PHOTO_MIME: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;
pub const DEFAULT_TIMEZONE: &str = "Asia/Jakarta";
pub const DEFAULT_OFFICE_START_HOUR: u32 = 9;
pub const DEFAULT_OFFICE_START_MINUTE: u32 = 0;
pub const DEFAULT_TOKEN_ISSUER: &str = "shop-retail-employee-service";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;
