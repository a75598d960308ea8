use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::domain::{Inspection, InspectionId, InspectionResult, InspectorStats};
use super::service::{InspectionError, InspectionService};
use crate::admin::domain::UserId;
use crate::catalog::domain::FoodTruckId;

#[derive(Debug, Deserialize)]
pub struct AssignInspector {
    pub food_truck_id: FoodTruckId,
    pub inspector_id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct InspectionUpdate {
    pub result: InspectionResult,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Routes under `/api/inspections`.
pub fn inspections_router(service: Arc<InspectionService>) -> Router {
    Router::new()
        .route(
            "/api/inspections",
            get(list_inspections).post(assign_inspector),
        )
        .route(
            "/api/inspections/:id",
            get(get_inspection).put(update_inspection),
        )
        .route("/api/inspections/result/:result", get(by_result))
        .route("/api/inspections/inspector/:id", get(by_inspector))
        .route(
            "/api/inspections/inspector/:id/pending",
            get(pending_for_inspector),
        )
        .route(
            "/api/inspections/inspector/:id/stats",
            get(inspector_stats),
        )
        .with_state(service)
}

async fn assign_inspector(
    State(service): State<Arc<InspectionService>>,
    Json(payload): Json<AssignInspector>,
) -> Result<(StatusCode, Json<Inspection>), InspectionError> {
    let inspection = service.assign_inspector(payload.food_truck_id, payload.inspector_id)?;
    Ok((StatusCode::CREATED, Json(inspection)))
}

async fn list_inspections(
    State(service): State<Arc<InspectionService>>,
) -> Result<Json<Vec<Inspection>>, InspectionError> {
    Ok(Json(service.inspections()?))
}

async fn get_inspection(
    State(service): State<Arc<InspectionService>>,
    Path(id): Path<u64>,
) -> Result<Json<Inspection>, InspectionError> {
    Ok(Json(service.inspection(InspectionId(id))?))
}

async fn update_inspection(
    State(service): State<Arc<InspectionService>>,
    Path(id): Path<u64>,
    Json(payload): Json<InspectionUpdate>,
) -> Result<Json<Inspection>, InspectionError> {
    Ok(Json(service.update_inspection(
        InspectionId(id),
        payload.result,
        payload.notes,
    )?))
}

async fn by_result(
    State(service): State<Arc<InspectionService>>,
    Path(result): Path<String>,
) -> Result<Json<Vec<Inspection>>, InspectionError> {
    let result: InspectionResult = result.parse().map_err(InspectionError::Validation)?;
    Ok(Json(service.by_result(result)?))
}

async fn by_inspector(
    State(service): State<Arc<InspectionService>>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<Inspection>>, InspectionError> {
    Ok(Json(service.by_inspector(UserId(id))?))
}

async fn pending_for_inspector(
    State(service): State<Arc<InspectionService>>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<Inspection>>, InspectionError> {
    Ok(Json(service.pending_for_inspector(UserId(id))?))
}

async fn inspector_stats(
    State(service): State<Arc<InspectionService>>,
    Path(id): Path<u64>,
) -> Result<Json<InspectorStats>, InspectionError> {
    Ok(Json(service.inspector_stats(UserId(id))?))
}
