//! Health, status, and usage endpoints

use crate::core::dispatcher::ProviderStatus;
use crate::monitoring::UsageStats;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{web, HttpResponse};
use std::borrow::Cow;
use tracing::{debug, info};

/// Configure health and status routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(health_check))
            .route("/detailed", web::get().to(detailed_health_check)),
    )
    .route("/status", web::get().to(system_status))
    .route("/version", web::get().to(version_info))
    .route("/stats", web::get().to(usage_stats))
    .route("/stats/reset", web::post().to(reset_usage_stats));
}

/// Basic health check endpoint
///
/// Used by load balancers; always healthy while the process serves.
async fn health_check() -> HttpResponse {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
    };

    HttpResponse::Ok().json(ApiResponse::success(health_status))
}

/// Detailed health check endpoint
///
/// Reports per-provider configuration status and the usage snapshot. The
/// gateway is `degraded` when no provider has credentials: every dispatch
/// then serves fallback responses.
async fn detailed_health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Detailed health check requested");

    let providers = state.dispatcher.provider_status();
    let status = if state.dispatcher.any_configured() {
        Cow::Borrowed("healthy")
    } else {
        Cow::Borrowed("degraded")
    };

    let detailed = DetailedHealthStatus {
        status,
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        uptime_seconds: get_uptime_seconds(),
        providers,
        usage: state.usage.stats(),
    };

    HttpResponse::Ok().json(ApiResponse::success(detailed))
}

/// System status endpoint
async fn system_status(state: web::Data<AppState>) -> HttpResponse {
    debug!("System status requested");

    let system_status = SystemStatus {
        service_name: Cow::Borrowed("eKYC Red-Team Gateway"),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        uptime_seconds: get_uptime_seconds(),
        timestamp: chrono::Utc::now(),
        server_host: state.config.server.host.clone(),
        server_port: state.config.server.port,
        configured_providers: state
            .dispatcher
            .provider_status()
            .into_iter()
            .filter(|p| p.configured)
            .map(|p| p.name)
            .collect(),
    };

    HttpResponse::Ok().json(ApiResponse::success(system_status))
}

/// Version information endpoint
async fn version_info() -> HttpResponse {
    debug!("Version info requested");

    let version_info = VersionInfo {
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        build_time: Cow::Borrowed(env!("BUILD_TIME")),
        git_hash: Cow::Borrowed(env!("GIT_HASH")),
        rust_version: Cow::Borrowed(env!("RUST_VERSION")),
    };

    HttpResponse::Ok().json(ApiResponse::success(version_info))
}

/// Usage counters endpoint
async fn usage_stats(state: web::Data<AppState>) -> HttpResponse {
    debug!("Usage stats requested");
    HttpResponse::Ok().json(ApiResponse::success(state.usage.stats()))
}

/// Zero the usage counters; explicit operator action
async fn reset_usage_stats(state: web::Data<AppState>) -> HttpResponse {
    info!("Usage counters reset by operator");
    state.usage.reset();
    HttpResponse::Ok().json(ApiResponse::success(state.usage.stats()))
}

/// Basic health status
#[derive(Debug, Clone, serde::Serialize)]
struct HealthStatus {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
}

/// Detailed health status
#[derive(Debug, Clone, serde::Serialize)]
struct DetailedHealthStatus {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
    uptime_seconds: u64,
    providers: Vec<ProviderStatus>,
    usage: UsageStats,
}

/// System status information
#[derive(Debug, Clone, serde::Serialize)]
struct SystemStatus {
    service_name: Cow<'static, str>,
    version: Cow<'static, str>,
    uptime_seconds: u64,
    timestamp: chrono::DateTime<chrono::Utc>,
    server_host: String,
    server_port: u16,
    configured_providers: Vec<&'static str>,
}

/// Version information
#[derive(Debug, Clone, serde::Serialize)]
struct VersionInfo {
    version: Cow<'static, str>,
    build_time: Cow<'static, str>,
    git_hash: Cow<'static, str>,
    rust_version: Cow<'static, str>,
}

/// Process uptime in seconds
fn get_uptime_seconds() -> u64 {
    static START_TIME: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();
    let start = START_TIME.get_or_init(std::time::Instant::now);
    start.elapsed().as_secs()
}
