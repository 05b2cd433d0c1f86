// ============================================================================
// HRIS API - Employee Handlers
// File: crates/hris-api/src/handlers/employees.rs
// ============================================================================

use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use hris_core::services::{EmployeeUpdate, NewEmployee};

use crate::dto::{
    CreateEmployeeRequest, CreatedResponse, EmployeeResponse, PhotoResponse, UpdateEmployeeRequest,
};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Multipart field carrying the photo.
const PHOTO_FIELD: &str = "photo";

/// POST /api/v1/employees
pub async fn create(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>), ApiError> {
    let Json(payload) = payload?;
    let id = state
        .employees
        .create(
            &caller,
            NewEmployee {
                id: payload.id,
                profile: payload.profile,
                password: payload.password,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(CreatedResponse { id }))))
}

/// GET /api/v1/employees
pub async fn list(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<ApiResponse<Vec<EmployeeResponse>>>, ApiError> {
    let employees = state.employees.find_all(&caller).await?;
    Ok(Json(ApiResponse::success(
        employees.into_iter().map(EmployeeResponse::from).collect(),
    )))
}

/// GET /api/v1/employees/me
pub async fn me(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<ApiResponse<EmployeeResponse>>, ApiError> {
    let employee = state.employees.find_by_id(&caller, &caller.user_id).await?;
    Ok(Json(ApiResponse::success(employee.into())))
}

/// GET /api/v1/employees/{id}
pub async fn get(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EmployeeResponse>>, ApiError> {
    let employee = state.employees.find_by_id(&caller, &id).await?;
    Ok(Json(ApiResponse::success(employee.into())))
}

/// PUT /api/v1/employees/{id}
pub async fn update(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateEmployeeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<EmployeeResponse>>, ApiError> {
    let Json(payload) = payload?;
    let photo = payload.photo.map(|p| p.decode()).transpose()?;

    let employee = state
        .employees
        .update(
            &caller,
            EmployeeUpdate {
                id,
                profile: payload.profile,
                password: payload.password,
                photo,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(employee.into())))
}

/// PUT /api/v1/employees/{id}/photo (multipart field `photo`)
pub async fn update_photo(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<PhotoResponse>>, ApiError> {
    let mut photo: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(PHOTO_FIELD) {
            continue;
        }
        let content_type = field
            .content_type()
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadRequest("photo content type is required".into()))?;
        let bytes = field.bytes().await?;
        photo = Some((bytes.to_vec(), content_type));
    }

    let (bytes, content_type) =
        photo.ok_or_else(|| ApiError::BadRequest("photo field is required".into()))?;
    info!(employee_id = %id, size = bytes.len(), "Photo upload received");

    let stored = state
        .employees
        .update_photo(&caller, &id, bytes, &content_type)
        .await?;

    Ok(Json(ApiResponse::success(PhotoResponse {
        url: stored.url,
        mime: stored.mime,
    })))
}

/// DELETE /api/v1/employees/{id}/photo
pub async fn remove_photo(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.employees.remove_photo(&caller, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/employees/{id}
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.employees.delete(&caller, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
