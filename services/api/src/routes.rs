use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json, Router};
use permitdesk::admin::router::admin_router;
use permitdesk::catalog::router::catalog_router;
use permitdesk::dashboard::router::dashboard_router;
use permitdesk::inspections::router::inspections_router;
use permitdesk::permits::router::permits_router;
use serde_json::json;

use crate::infra::{AppState, Services};

pub(crate) fn app_routes(services: Services) -> Router {
    Router::new()
        .merge(catalog_router(services.catalog))
        .merge(admin_router(services.admin))
        .merge(permits_router(services.permits))
        .merge(inspections_router(services.inspections))
        .merge(dashboard_router(services.dashboard))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
