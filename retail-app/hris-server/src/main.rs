use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use hris_api::{create_router, AppState};
use hris_core::domain::AttendancePolicy;
use hris_core::services::{Argon2Hasher, AttendanceService, AuthService, EmployeeService};
use hris_infrastructure::{
    create_pool, run_migrations, PgAttendanceRepository, PgEmployeeRepository, S3PhotoStorage,
};
use hris_security::JwtService;
use hris_shared::config::AppConfig;
use hris_shared::{SystemClock, UuidV7Generator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Initialize telemetry
    let _log_guard = hris_shared::telemetry::init_telemetry(&config.log);

    info!(env = %config.app.env, "{} starting...", config.app.name);

    // Connect to Database
    let pool = create_pool(&config.database)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool).await.context("failed to run migrations")?;
    info!("Database connection established.");

    // Object storage
    let storage = Arc::new(S3PhotoStorage::from_settings(&config.storage).await);
    if let Err(e) = storage.ensure_bucket().await {
        warn!("Photo bucket not ready, uploads will fail until it exists: {}", e);
    }

    // Wire services
    let timeout = config.app.request_timeout();
    let clock = Arc::new(SystemClock);
    let ids = Arc::new(UuidV7Generator);
    let hasher = Arc::new(Argon2Hasher);
    let employee_repo = Arc::new(PgEmployeeRepository::new(pool.clone()));
    let attendance_repo = Arc::new(PgAttendanceRepository::new(pool));
    let tokens = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.issuer.clone(),
        config.jwt.ttl_seconds,
    ));
    let policy = AttendancePolicy::new(
        config.attendance.timezone()?,
        config.attendance.office_start()?,
    );
    info!(
        timezone = %policy.timezone(),
        office_start = %policy.office_start(),
        "Attendance policy loaded"
    );

    let state = AppState {
        employees: Arc::new(EmployeeService::new(
            employee_repo.clone(),
            storage,
            hasher.clone(),
            ids.clone(),
            clock.clone(),
            timeout,
        )),
        attendance: Arc::new(AttendanceService::new(
            attendance_repo,
            employee_repo.clone(),
            policy,
            clock,
            ids,
            timeout,
        )),
        auth: Arc::new(AuthService::new(employee_repo, hasher, tokens, timeout)),
        service_name: config.app.name.clone(),
    };

    // Build router
    let app = create_router(state).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
    );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = until_signal(
        "SIGTERM",
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()).map(
            |mut signal| async move {
                signal.recv().await;
            },
        ),
    );

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Resolve when the signal arrives. A listener that failed to install never
/// resolves, so the server keeps running on the remaining signals.
#[cfg_attr(not(unix), allow(dead_code))]
async fn until_signal<F>(name: &str, listener: std::io::Result<F>)
where
    F: Future<Output = ()>,
{
    match listener {
        Ok(received) => received.await,
        Err(e) => {
            warn!("Failed to install {} handler: {}", name, e);
            std::future::pending::<()>().await
        }
    }
}
