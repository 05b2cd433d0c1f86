// ============================================================================
// HRIS API - Auth Handlers
// File: crates/hris-api/src/handlers/auth.rs
// ============================================================================

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::dto::{LoginRequest, LoginResponse};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Login handler - POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let Json(payload) = payload?;
    let result = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(ApiResponse::success(result.into())))
}
