//! Router assembly

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use hris_shared::constants::MAX_PHOTO_SIZE;

use crate::handlers::{attendance, auth, employees, health};
use crate::state::AppState;

/// Room for a base64-encoded photo (4/3 expansion) plus profile fields.
const EMPLOYEE_BODY_LIMIT: usize = MAX_PHOTO_SIZE / 3 * 4 + 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    let employee_routes = Router::new()
        .route("/", post(employees::create).get(employees::list))
        .route("/me", get(employees::me))
        .route(
            "/{id}",
            get(employees::get)
                .put(employees::update)
                .delete(employees::delete),
        )
        .route(
            "/{id}/photo",
            put(employees::update_photo).delete(employees::remove_photo),
        )
        .layer(DefaultBodyLimit::max(EMPLOYEE_BODY_LIMIT));

    let attendance_routes = Router::new()
        .route("/check-in", post(attendance::check_in))
        .route("/check-out", post(attendance::check_out))
        .route("/today", get(attendance::today));

    let api = Router::new()
        .route("/auth/login", post(auth::login))
        .nest("/employees", employee_routes)
        .nest("/attendances", attendance_routes);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
