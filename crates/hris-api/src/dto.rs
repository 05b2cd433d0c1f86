//! Request and response payloads

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use hris_core::domain::{
    Attendance, AttendanceState, Employee, EmployeeProfile, EmployeeStatus, PhotoMime, PhotoUpload,
    ProfilePatch, Role,
};
use hris_core::services::LoginResult;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub employee_id: String,
    pub role: Role,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            access_token: result.access_token,
            token_type: "Bearer",
            employee_id: result.employee_id,
            role: result.role,
        }
    }
}

/// POST /api/v1/employees
#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub password: String,
    #[serde(flatten)]
    pub profile: EmployeeProfile,
}

/// PUT /api/v1/employees/{id}
#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeRequest {
    /// Omitted or blank keeps the stored password.
    #[serde(default)]
    pub password: Option<String>,
    /// Omitted keeps the stored photo.
    #[serde(default)]
    pub photo: Option<PhotoPayload>,
    /// Omitted profile fields keep their stored values.
    #[serde(flatten)]
    pub profile: ProfilePatch,
}

/// Inline photo: base64 payload plus its content type.
#[derive(Debug, Deserialize)]
pub struct PhotoPayload {
    pub mime: String,
    pub data: String,
}

impl PhotoPayload {
    pub fn decode(self) -> Result<PhotoUpload, ApiError> {
        let bytes = STANDARD
            .decode(self.data.trim())
            .map_err(|e| ApiError::BadRequest(format!("photo is not valid base64: {}", e)))?;
        Ok(PhotoUpload::new(bytes, &self.mime)?)
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub position: String,
    pub salary: i64,
    pub status: EmployeeStatus,
    pub address: String,
    pub district: String,
    pub city: String,
    pub province: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_mime: Option<PhotoMime>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(e: Employee) -> Self {
        let (photo_url, photo_mime) = match e.photo {
            Some(photo) => (Some(photo.url), Some(photo.mime)),
            None => (None, None),
        };
        Self {
            id: e.id,
            name: e.name,
            email: e.email,
            role: e.role,
            position: e.position,
            salary: e.salary,
            status: e.status,
            address: e.address,
            district: e.district,
            city: e.city,
            province: e.province,
            phone: e.phone,
            photo_url,
            photo_mime,
            birth_date: e.birth_date,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    pub url: String,
    pub mime: PhotoMime,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CheckInRequest {
    #[serde(default)]
    #[validate(length(max = 255, message = "Location too long"))]
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct AttendanceResponse {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub location: String,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub is_late: bool,
    pub date: NaiveDate,
    pub status: AttendanceState,
}

impl From<Attendance> for AttendanceResponse {
    fn from(a: Attendance) -> Self {
        let status = a.state();
        Self {
            id: a.id,
            employee_id: a.employee_id,
            employee_name: a.employee_name,
            location: a.location,
            check_in: a.check_in,
            check_out: a.check_out,
            is_late: a.is_late,
            date: a.date.date(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_leaves_omitted_fields_unset() {
        let body = r#"{
            "name": "Budi", "email": "budi@shop.id", "role": "staff",
            "address": "Jl. A", "district": "B", "city": "C",
            "province": "D", "phone": "0812"
        }"#;
        let req: UpdateEmployeeRequest = serde_json::from_str(body).unwrap();
        assert!(req.password.is_none());
        assert!(req.photo.is_none());
        assert_eq!(req.profile.role, Some(Role::Staff));
        assert_eq!(req.profile.city.as_deref(), Some("C"));
        assert!(req.profile.salary.is_none());
        assert!(req.profile.position.is_none());
        assert!(req.profile.status.is_none());
    }

    #[test]
    fn test_update_request_accepts_single_field() {
        let req: UpdateEmployeeRequest =
            serde_json::from_str(r#"{ "status": "suspended" }"#).unwrap();
        assert_eq!(req.profile.status, Some(EmployeeStatus::Suspended));
        assert!(req.profile.name.is_none());
    }

    #[test]
    fn test_photo_payload_decodes_base64() {
        let payload = PhotoPayload {
            mime: "image/jpg".into(),
            data: STANDARD.encode([0xFF, 0xD8, 0xFF]),
        };
        let upload = payload.decode().unwrap();
        assert_eq!(upload.mime(), PhotoMime::Jpeg);
        assert_eq!(upload.len(), 3);

        let bad = PhotoPayload {
            mime: "image/png".into(),
            data: "***".into(),
        };
        assert!(matches!(bad.decode(), Err(ApiError::BadRequest(_))));
    }
}
