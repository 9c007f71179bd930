use crate::server::state::ApiState;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::{Json, response::IntoResponse};
use std::sync::LazyLock;
use std::time::Instant;
use tracing::warn;
use vows_derive::{api_handler, api_model};
use vows_domain::constants::SYSTEM_TAG;

#[api_model]
/// Health check response
struct HealthResponse {
    /// `up` or `degraded`
    status: &'static str,
    /// Whether the store answered its health probe
    database: bool,
    /// Version
    version: &'static str,
    /// Uptime in seconds
    uptime: u64,
}

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

#[api_handler(
    get,
    path = "/health",
    responses(
        (status = OK, description = "Service and store are healthy", body = HealthResponse),
        (status = SERVICE_UNAVAILABLE, description = "Store is unreachable", body = HealthResponse),
    ),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let database = match state.database.health().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Database health probe failed");
            false
        },
    };

    let body = HealthResponse {
        status: if database { "up" } else { "degraded" },
        database,
        version: env!("CARGO_PKG_VERSION"),
        uptime: START_TIME.elapsed().as_secs(),
    };
    let status = if database { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };

    (
        status,
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(body),
    )
}
