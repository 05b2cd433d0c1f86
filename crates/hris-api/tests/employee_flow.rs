//! End-to-end HTTP scenarios over the in-memory adapters.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{NaiveTime, TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use hris_api::{create_router, AppState};
use hris_core::domain::{AttendancePolicy, Employee, EmployeeProfile, EmployeeStatus, Role};
use hris_core::services::{Argon2Hasher, AttendanceService, AuthService, EmployeeService};
use hris_infrastructure::memory::{
    InMemoryAttendanceRepository, InMemoryEmployeeRepository, InMemoryPhotoStorage,
};
use hris_security::{JwtService, PasswordService};
use hris_shared::clock::FixedClock;
use hris_shared::UuidV7Generator;

const HR_EMAIL: &str = "hr@shop.id";
const HR_PASSWORD: &str = "hr-password-1";

struct TestApp {
    router: Router,
    photos: Arc<InMemoryPhotoStorage>,
}

/// Router wired to in-memory stores, with the clock fixed at `hour:minute`
/// Asia/Jakarta time and one HR account seeded.
async fn app_at(hour: u32, minute: u32) -> TestApp {
    let now = chrono_tz::Asia::Jakarta
        .with_ymd_and_hms(2024, 1, 15, hour, minute, 0)
        .single()
        .unwrap()
        .with_timezone(&Utc);

    let employees = Arc::new(InMemoryEmployeeRepository::new());
    let hr = Employee::create(
        "hr-1".into(),
        EmployeeProfile {
            name: "Rina HR".into(),
            email: HR_EMAIL.into(),
            role: Role::Hr,
            position: "HR Lead".into(),
            salary: 9_000_000,
            status: EmployeeStatus::Active,
            address: "Jl. Thamrin 10".into(),
            district: "Menteng".into(),
            city: "Jakarta Pusat".into(),
            province: "DKI Jakarta".into(),
            phone: "0811000001".into(),
            birth_date: None,
        },
        PasswordService::hash(HR_PASSWORD).unwrap(),
        now,
    )
    .unwrap();
    employees.insert(hr).await;

    let photos = Arc::new(InMemoryPhotoStorage::new("http://photos.test/employee-photos"));
    let clock = Arc::new(FixedClock(now));
    let ids = Arc::new(UuidV7Generator);
    let hasher = Arc::new(Argon2Hasher);
    let timeout = Duration::from_secs(5);
    let policy = AttendancePolicy::new(
        chrono_tz::Asia::Jakarta,
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    );

    let state = AppState {
        employees: Arc::new(EmployeeService::new(
            employees.clone(),
            photos.clone(),
            hasher.clone(),
            ids.clone(),
            clock.clone(),
            timeout,
        )),
        attendance: Arc::new(AttendanceService::new(
            Arc::new(InMemoryAttendanceRepository::new()),
            employees.clone(),
            policy,
            clock,
            ids,
            timeout,
        )),
        auth: Arc::new(AuthService::new(
            employees,
            hasher,
            Arc::new(JwtService::new("integration-secret", "hris-test", 3600)),
            timeout,
        )),
        service_name: "hris-server".into(),
    };

    TestApp {
        router: create_router(state),
        photos,
    }
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn photo_request(uri: &str, token: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "hris-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"me.png\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn login(app: &TestApp, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            json!({ "email": email, "password": password }),
        ),
    )
    .await
}

async fn token_for(app: &TestApp, email: &str, password: &str) -> String {
    let (status, body) = login(app, email, password).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["access_token"].as_str().unwrap().to_string()
}

fn staff_payload(email: &str) -> Value {
    json!({
        "name": "Budi Santoso",
        "email": email,
        "password": "staff-password",
        "role": "staff",
        "position": "Cashier",
        "salary": 5000000,
        "address": "Jl. Merdeka No. 1",
        "district": "Gambir",
        "city": "Jakarta Pusat",
        "province": "DKI Jakarta",
        "phone": "08123456789"
    })
}

async fn create_staff(app: &TestApp, hr_token: &str, email: &str) -> String {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/employees",
            Some(hr_token),
            staff_payload(email),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_is_public() {
    let app = app_at(8, 0).await;
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["service"], "hris-server");
}

#[tokio::test]
async fn test_register_login_and_attendance_day() {
    let app = app_at(8, 0).await;
    let hr_token = token_for(&app, HR_EMAIL, HR_PASSWORD).await;

    let staff_id = create_staff(&app, &hr_token, "Budi@Shop.id").await;
    assert!(!staff_id.is_empty());

    let (status, body) = login(&app, "budi@shop.id", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");

    let staff_token = token_for(&app, "budi@shop.id", "staff-password").await;
    assert!(!staff_token.is_empty());

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/attendances/check-in",
            Some(&staff_token),
            json!({ "location": "Store 12" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["is_late"], false);
    assert_eq!(body["data"]["date"], "2024-01-15");
    assert_eq!(body["data"]["employee_id"], staff_id.as_str());
    assert_eq!(body["data"]["status"], "checked_in");

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/attendances/check-in",
            Some(&staff_token),
            json!({ "location": "Store 12" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "You've already checked in today");

    let (status, body) = send(
        &app,
        empty_request(Method::POST, "/api/v1/attendances/check-out", &staff_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["data"]["check_out"].is_string());
    assert_eq!(body["data"]["status"], "checked_out");

    let (status, body) = send(
        &app,
        empty_request(Method::POST, "/api/v1/attendances/check-out", &staff_token),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "You have already checked out today");

    let (status, body) = send(
        &app,
        empty_request(Method::GET, "/api/v1/attendances/today", &staff_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "checked_out");
}

#[tokio::test]
async fn test_late_check_in_and_check_out_without_check_in() {
    let app = app_at(9, 15).await;
    let hr_token = token_for(&app, HR_EMAIL, HR_PASSWORD).await;

    let (status, body) = send(
        &app,
        empty_request(Method::POST, "/api/v1/attendances/check-out", &hr_token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NO_CHECK_IN_TODAY");

    // Check-in body is optional
    let (status, body) = send(
        &app,
        empty_request(Method::POST, "/api/v1/attendances/check-in", &hr_token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["is_late"], true);
}

#[tokio::test]
async fn test_staff_is_scoped_to_own_record() {
    let app = app_at(8, 0).await;
    let hr_token = token_for(&app, HR_EMAIL, HR_PASSWORD).await;
    let staff_id = create_staff(&app, &hr_token, "budi@shop.id").await;
    let staff_token = token_for(&app, "budi@shop.id", "staff-password").await;

    let (status, _) = send(&app, empty_request(Method::GET, "/api/v1/employees", &staff_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, empty_request(Method::GET, "/api/v1/employees/hr-1", &staff_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, empty_request(Method::GET, "/api/v1/employees/me", &staff_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], staff_id.as_str());
    assert!(body["data"].get("password_hash").is_none());

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/employees",
            Some(&staff_token),
            staff_payload("other@shop.id"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let mut promote = staff_payload("budi@shop.id");
    promote["role"] = json!("manager");
    let (status, _) = send(
        &app,
        json_request(
            Method::PUT,
            &format!("/api/v1/employees/{staff_id}"),
            Some(&staff_token),
            promote,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let app = app_at(8, 0).await;
    let hr_token = token_for(&app, HR_EMAIL, HR_PASSWORD).await;
    create_staff(&app, &hr_token, "budi@shop.id").await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/employees",
            Some(&hr_token),
            staff_payload("  BUDI@shop.id "),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "DUPLICATE");
}

#[tokio::test]
async fn test_photo_survives_profile_update_and_password_is_kept() {
    let app = app_at(8, 0).await;
    let hr_token = token_for(&app, HR_EMAIL, HR_PASSWORD).await;
    let staff_id = create_staff(&app, &hr_token, "budi@shop.id").await;
    let staff_token = token_for(&app, "budi@shop.id", "staff-password").await;
    let photo_uri = format!("/api/v1/employees/{staff_id}/photo");

    let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    let (status, body) = send(&app, photo_request(&photo_uri, &staff_token, "image/png", &png)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let url = body["data"]["url"].as_str().unwrap().to_string();
    assert!(url.starts_with(&format!(
        "http://photos.test/employee-photos/employees/{staff_id}/"
    )));
    assert_eq!(app.photos.len().await, 1);

    let (status, _) = send(
        &app,
        photo_request(&photo_uri, &staff_token, "application/pdf", b"%PDF"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut profile = staff_payload("budi@shop.id");
    profile.as_object_mut().unwrap().remove("password");
    profile["phone"] = json!("0899999999");
    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            &format!("/api/v1/employees/{staff_id}"),
            Some(&staff_token),
            profile,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["phone"], "0899999999");
    assert_eq!(body["data"]["photo_url"], url.as_str());
    assert_eq!(body["data"]["photo_mime"], "image/png");

    // Password was omitted from the update, so the old one still works
    token_for(&app, "budi@shop.id", "staff-password").await;
}

#[tokio::test]
async fn test_oversized_photo_is_rejected() {
    let app = app_at(8, 0).await;
    let hr_token = token_for(&app, HR_EMAIL, HR_PASSWORD).await;
    let too_big = vec![0u8; 5 * 1024 * 1024 + 1];

    let (status, body) = send(
        &app,
        photo_request("/api/v1/employees/hr-1/photo", &hr_token, "image/jpeg", &too_big),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "PHOTO_TOO_LARGE");
    assert!(app.photos.is_empty().await);
}

#[tokio::test]
async fn test_oversized_bodies_are_payload_too_large() {
    let app = app_at(8, 0).await;
    let hr_token = token_for(&app, HR_EMAIL, HR_PASSWORD).await;
    let eight_mib = vec![0u8; 8 * 1024 * 1024];

    let (status, body) = send(
        &app,
        photo_request("/api/v1/employees/hr-1/photo", &hr_token, "image/png", &eight_mib),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "PHOTO_TOO_LARGE");

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/v1/employees/hr-1",
            Some(&hr_token),
            json!({ "photo": { "mime": "image/png", "data": "A".repeat(8 * 1024 * 1024) } }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "PHOTO_TOO_LARGE");
    assert!(app.photos.is_empty().await);
}

#[tokio::test]
async fn test_partial_update_keeps_omitted_fields() {
    let app = app_at(8, 0).await;
    let hr_token = token_for(&app, HR_EMAIL, HR_PASSWORD).await;
    let staff_id = create_staff(&app, &hr_token, "budi@shop.id").await;

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            &format!("/api/v1/employees/{staff_id}"),
            Some(&hr_token),
            json!({ "phone": "0877777777" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["phone"], "0877777777");
    assert_eq!(body["data"]["salary"], 5000000);
    assert_eq!(body["data"]["position"], "Cashier");
    assert_eq!(body["data"]["name"], "Budi Santoso");
}

#[tokio::test]
async fn test_photo_can_be_removed() {
    let app = app_at(8, 0).await;
    let hr_token = token_for(&app, HR_EMAIL, HR_PASSWORD).await;
    let staff_id = create_staff(&app, &hr_token, "budi@shop.id").await;
    let staff_token = token_for(&app, "budi@shop.id", "staff-password").await;
    let photo_uri = format!("/api/v1/employees/{staff_id}/photo");

    let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    let (status, _) = send(&app, photo_request(&photo_uri, &staff_token, "image/png", &png)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, empty_request(Method::DELETE, &photo_uri, &staff_token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app,
        empty_request(Method::GET, &format!("/api/v1/employees/{staff_id}"), &staff_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["data"]["photo_url"].is_null());

    // Removing again is harmless
    let (status, _) = send(&app, empty_request(Method::DELETE, &photo_uri, &staff_token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_deleted_employee_reads_as_gone() {
    let app = app_at(8, 0).await;
    let hr_token = token_for(&app, HR_EMAIL, HR_PASSWORD).await;
    let staff_id = create_staff(&app, &hr_token, "budi@shop.id").await;
    let uri = format!("/api/v1/employees/{staff_id}");

    let (status, _) = send(&app, empty_request(Method::DELETE, &uri, &hr_token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, empty_request(Method::GET, &uri, &hr_token)).await;
    assert_eq!(status, StatusCode::GONE);
    assert_eq!(body["error"]["code"], "DELETED");

    let (status, _) = send(
        &app,
        empty_request(Method::GET, "/api/v1/employees/does-not-exist", &hr_token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, empty_request(Method::GET, "/api/v1/employees", &hr_token)).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["hr-1"]);

    // Deleted accounts can no longer log in
    let (status, _) = login(&app, "budi@shop.id", "staff-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_requests_without_valid_token_are_unauthorized() {
    let app = app_at(8, 0).await;

    let request = Request::builder()
        .uri("/api/v1/employees/me")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, empty_request(Method::GET, "/api/v1/employees/me", "not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
