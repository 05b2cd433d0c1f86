//! Configuration management

use chrono::NaiveTime;
use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::constants::{
    DEFAULT_OFFICE_START_HOUR, DEFAULT_OFFICE_START_MINUTE, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_TIMEZONE, DEFAULT_TOKEN_ISSUER,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub attendance: AttendanceSettings,
    pub storage: StorageSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub request_timeout_secs: u64,
}

impl AppSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub issuer: String,
    pub ttl_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AttendanceSettings {
    pub timezone: String,
    pub office_start_hour: u32,
    pub office_start_minute: u32,
}

impl AttendanceSettings {
    /// Resolve the IANA timezone name, e.g. `Asia/Jakarta`.
    pub fn timezone(&self) -> Result<Tz, AppError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AppError::UnknownTimezone(self.timezone.clone()))
    }

    pub fn office_start(&self) -> Result<NaiveTime, AppError> {
        NaiveTime::from_hms_opt(self.office_start_hour, self.office_start_minute, 0).ok_or_else(
            || {
                AppError::InvalidConfig(format!(
                    "office start {:02}:{:02} is not a valid time of day",
                    self.office_start_hour, self.office_start_minute
                ))
            },
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    /// Base used to build public photo URLs; falls back to `endpoint`.
    pub public_base_url: Option<String>,
    pub force_path_style: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
    pub directory: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "hris-server")?
            .set_default("app.request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("jwt.issuer", DEFAULT_TOKEN_ISSUER)?
            .set_default("jwt.ttl_seconds", 3600)?
            .set_default("attendance.timezone", DEFAULT_TIMEZONE)?
            .set_default("attendance.office_start_hour", DEFAULT_OFFICE_START_HOUR as i64)?
            .set_default("attendance.office_start_minute", DEFAULT_OFFICE_START_MINUTE as i64)?
            .set_default("storage.endpoint", "http://127.0.0.1:9000")?
            .set_default("storage.region", "us-east-1")?
            .set_default("storage.bucket", "employee-photos")?
            .set_default("storage.force_path_style", true)?
            .set_default("log.level", "info")?
            .set_default("log.json", true)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt.ttl_seconds <= 0 {
            return Err(AppError::InvalidConfig(
                "jwt.ttl_seconds must be greater than zero".into(),
            ));
        }
        if self.jwt.secret.trim().is_empty() {
            return Err(AppError::InvalidConfig("jwt.secret must be set".into()));
        }
        if self.app.request_timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "app.request_timeout_secs must be greater than zero".into(),
            ));
        }
        self.attendance.timezone()?;
        self.attendance.office_start()?;
        Ok(())
    }
}
