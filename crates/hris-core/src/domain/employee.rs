// ============================================================================
// HRIS Core - Employee Entity
// File: crates/hris-core/src/domain/employee.rs
// Description: Employee profile record, roles, and lifecycle state
// ============================================================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use hris_shared::utils::normalize_email;

use crate::domain::photo::PhotoRef;
use crate::error::DomainError;

/// Employee role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Supervisor,
    Manager,
    Hr,
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Supervisor => "supervisor",
            Role::Manager => "manager",
            Role::Hr => "hr",
            Role::Staff => "staff",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "supervisor" => Some(Role::Supervisor),
            "manager" => Some(Role::Manager),
            "hr" => Some(Role::Hr),
            "staff" => Some(Role::Staff),
            _ => None,
        }
    }

    /// Supervisor, manager and HR may manage any employee record.
    pub fn is_privileged(&self) -> bool {
        !matches!(self, Role::Staff)
    }
}

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
            EmployeeStatus::Suspended => "suspended",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(EmployeeStatus::Active),
            "inactive" => Some(EmployeeStatus::Inactive),
            "suspended" => Some(EmployeeStatus::Suspended),
            _ => None,
        }
    }
}

/// Soft-delete state of a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Alive,
    Deleted { deleted_at: DateTime<Utc> },
}

impl Lifecycle {
    pub fn from_deleted_at(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(deleted_at) => Lifecycle::Deleted { deleted_at },
            None => Lifecycle::Alive,
        }
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Lifecycle::Alive => None,
            Lifecycle::Deleted { deleted_at } => Some(*deleted_at),
        }
    }
}

/// Caller-supplied profile fields, shared by create and full-profile update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EmployeeProfile {
    #[validate(length(min = 1, max = 150, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    pub role: Role,

    #[serde(default)]
    #[validate(length(max = 100, message = "Position too long"))]
    pub position: String,

    #[serde(default)]
    #[validate(range(min = 0, message = "Salary cannot be negative"))]
    pub salary: i64,

    #[serde(default)]
    pub status: EmployeeStatus,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    #[validate(length(min = 1, message = "District is required"))]
    pub district: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, message = "Province is required"))]
    pub province: String,

    #[validate(length(min = 1, max = 20, message = "Phone is required"))]
    pub phone: String,

    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl EmployeeProfile {
    /// Trim every text field and lowercase the email.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            position: self.position.trim().to_string(),
            address: self.address.trim().to_string(),
            district: self.district.trim().to_string(),
            city: self.city.trim().to_string(),
            province: self.province.trim().to_string(),
            phone: self.phone.trim().to_string(),
            ..self
        }
    }

    /// Normalize, then enforce the required-field contract.
    pub fn checked(self) -> Result<Self, DomainError> {
        let profile = self.normalized();
        profile.validate()?;
        Ok(profile)
    }
}

/// Partial profile for updates: omitted fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub position: Option<String>,
    pub salary: Option<i64>,
    pub status: Option<EmployeeStatus>,
    pub address: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl ProfilePatch {
    /// Overlay the supplied fields on `base`.
    pub fn apply(self, base: EmployeeProfile) -> EmployeeProfile {
        EmployeeProfile {
            name: self.name.unwrap_or(base.name),
            email: self.email.unwrap_or(base.email),
            role: self.role.unwrap_or(base.role),
            position: self.position.unwrap_or(base.position),
            salary: self.salary.unwrap_or(base.salary),
            status: self.status.unwrap_or(base.status),
            address: self.address.unwrap_or(base.address),
            district: self.district.unwrap_or(base.district),
            city: self.city.unwrap_or(base.city),
            province: self.province.unwrap_or(base.province),
            phone: self.phone.unwrap_or(base.phone),
            birth_date: self.birth_date.or(base.birth_date),
        }
    }
}

impl From<EmployeeProfile> for ProfilePatch {
    fn from(p: EmployeeProfile) -> Self {
        Self {
            name: Some(p.name),
            email: Some(p.email),
            role: Some(p.role),
            position: Some(p.position),
            salary: Some(p.salary),
            status: Some(p.status),
            address: Some(p.address),
            district: Some(p.district),
            city: Some(p.city),
            province: Some(p.province),
            phone: Some(p.phone),
            birth_date: p.birth_date,
        }
    }
}

/// Employee entity
///
/// Values are never mutated in place; every change goes through a `with_*`
/// constructor that re-checks the entity invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub position: String,
    pub salary: i64,
    pub status: EmployeeStatus,
    pub address: String,
    pub district: String,
    pub city: String,
    pub province: String,
    pub phone: String,
    pub photo: Option<PhotoRef>,
    pub birth_date: Option<NaiveDate>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lifecycle: Lifecycle,
}

impl Employee {
    /// Create a new, live employee from a checked profile and a password hash.
    pub fn create(
        id: String,
        profile: EmployeeProfile,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id.trim().is_empty() {
            return Err(DomainError::BadRequest("employee id cannot be empty".into()));
        }
        if password_hash.is_empty() {
            return Err(DomainError::BadRequest("password cannot be empty".into()));
        }
        let profile = profile.checked()?;

        Ok(Self {
            id,
            name: profile.name,
            email: profile.email,
            password_hash,
            role: profile.role,
            position: profile.position,
            salary: profile.salary,
            status: profile.status,
            address: profile.address,
            district: profile.district,
            city: profile.city,
            province: profile.province,
            phone: profile.phone,
            photo: None,
            birth_date: profile.birth_date,
            created_at: now,
            updated_at: now,
            lifecycle: Lifecycle::Alive,
        })
    }

    /// Replace every profile field; password, photo and audit data carry over.
    pub fn with_profile(self, profile: EmployeeProfile, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let profile = profile.checked()?;
        Ok(Self {
            name: profile.name,
            email: profile.email,
            role: profile.role,
            position: profile.position,
            salary: profile.salary,
            status: profile.status,
            address: profile.address,
            district: profile.district,
            city: profile.city,
            province: profile.province,
            phone: profile.phone,
            birth_date: profile.birth_date,
            updated_at: now,
            ..self
        })
    }

    pub fn with_password_hash(self, password_hash: String, now: DateTime<Utc>) -> Result<Self, DomainError> {
        if password_hash.is_empty() {
            return Err(DomainError::BadRequest("password cannot be empty".into()));
        }
        Ok(Self {
            password_hash,
            updated_at: now,
            ..self
        })
    }

    pub fn with_photo(self, photo: PhotoRef, now: DateTime<Utc>) -> Self {
        Self {
            photo: Some(photo),
            updated_at: now,
            ..self
        }
    }

    pub fn without_photo(self, now: DateTime<Utc>) -> Self {
        Self {
            photo: None,
            updated_at: now,
            ..self
        }
    }

    pub fn deleted(self, at: DateTime<Utc>) -> Self {
        Self {
            lifecycle: Lifecycle::Deleted { deleted_at: at },
            updated_at: at,
            ..self
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Deleted { .. })
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// Whether `profile` changes a field only privileged roles may set.
    pub fn changes_employment_terms(&self, profile: &EmployeeProfile) -> bool {
        self.role != profile.role
            || self.salary != profile.salary
            || self.status != profile.status
            || self.position != profile.position.trim()
    }

    pub fn profile(&self) -> EmployeeProfile {
        EmployeeProfile {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            position: self.position.clone(),
            salary: self.salary,
            status: self.status,
            address: self.address.clone(),
            district: self.district.clone(),
            city: self.city.clone(),
            province: self.province.clone(),
            phone: self.phone.clone(),
            birth_date: self.birth_date,
        }
    }
}
