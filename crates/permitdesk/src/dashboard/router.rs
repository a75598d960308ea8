use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use super::service::{DashboardError, DashboardService, DashboardStats};

/// Routes under `/api/superadmin/dashboard`.
pub fn dashboard_router(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/superadmin/dashboard/stats", get(dashboard_stats))
        .with_state(service)
}

async fn dashboard_stats(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<DashboardStats>, DashboardError> {
    Ok(Json(service.stats()?))
}
