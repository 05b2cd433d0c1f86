// ============================================================================
// HRIS API - Attendance Handlers
// File: crates/hris-api/src/handlers/attendance.rs
// ============================================================================

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::dto::{AttendanceResponse, CheckInRequest};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/attendances/check-in
///
/// The body is optional; `{"location": "..."}` records where the employee checked in.
pub async fn check_in(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<CheckInRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<AttendanceResponse>>), ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => CheckInRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };
    request.validate()?;

    let attendance = state
        .attendance
        .check_in(&caller.user_id, &request.location)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(attendance.into())),
    ))
}

/// POST /api/v1/attendances/check-out
pub async fn check_out(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<ApiResponse<AttendanceResponse>>, ApiError> {
    let attendance = state.attendance.check_out(&caller.user_id).await?;
    Ok(Json(ApiResponse::success(attendance.into())))
}

/// GET /api/v1/attendances/today
pub async fn today(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<ApiResponse<Option<AttendanceResponse>>>, ApiError> {
    let attendance = state.attendance.today(&caller.user_id).await?;
    Ok(Json(ApiResponse::success(attendance.map(AttendanceResponse::from))))
}
