use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;

use super::domain::{
    Application, ApplicationDetails, ApplicationId, ApplicationStatus, ApplicationSubmission,
    Document, Review, ReviewId, ReviewStatus, ReviewerStats, TruckWithOwner,
};
use super::service::{PermitError, PermitService};
use crate::admin::domain::{User, UserId};
use crate::pagination::{Page, PageRequest};

#[derive(Debug, Default, Deserialize)]
pub struct StatusFilter {
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewFilter {
    #[serde(default)]
    pub status: Option<ReviewStatus>,
}

#[derive(Debug, Deserialize)]
pub struct AssignReviewer {
    pub reviewer_id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct ReviewStatusUpdate {
    pub status: ReviewStatus,
}

/// Routes under `/api/applications` and `/api/reviews`.
pub fn permits_router(service: Arc<PermitService>) -> Router {
    Router::new()
        .route(
            "/api/applications",
            post(submit_application).get(list_applications),
        )
        .route("/api/applications/unassigned", get(unassigned_applications))
        .route("/api/applications/details", get(application_details))
        .route("/api/applications/reviewers", get(list_reviewers))
        .route("/api/applications/trucks/:status", get(trucks_by_status))
        .route("/api/applications/:id", get(get_application))
        .route("/api/applications/:id/documents", get(application_documents))
        .route(
            "/api/applications/assign-reviewer/:id",
            post(assign_reviewer),
        )
        .route(
            "/api/applications/:id/status/:status",
            put(update_application_status),
        )
        .route("/api/reviews", get(list_reviews))
        .route("/api/reviews/:id", get(get_review))
        .route("/api/reviews/status/:id", put(update_review_status))
        .route("/api/reviews/reviewer/:id", get(reviews_by_reviewer))
        .route("/api/reviews/reviewer/:id/stats", get(reviewer_stats))
        .with_state(service)
}

async fn submit_application(
    State(service): State<Arc<PermitService>>,
    Json(submission): Json<ApplicationSubmission>,
) -> Result<(StatusCode, Json<Application>), PermitError> {
    let application = service.submit(submission)?;
    Ok((StatusCode::CREATED, Json(application)))
}

async fn list_applications(
    State(service): State<Arc<PermitService>>,
    Query(page): Query<PageRequest>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Page<Application>>, PermitError> {
    Ok(Json(service.applications(&page, filter.status)?))
}

async fn unassigned_applications(
    State(service): State<Arc<PermitService>>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<Application>>, PermitError> {
    Ok(Json(service.unassigned(&page)?))
}

async fn application_details(
    State(service): State<Arc<PermitService>>,
    Query(page): Query<PageRequest>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Page<ApplicationDetails>>, PermitError> {
    Ok(Json(service.details(&page, filter.status)?))
}

async fn list_reviewers(
    State(service): State<Arc<PermitService>>,
) -> Result<Json<Vec<User>>, PermitError> {
    Ok(Json(service.reviewers()?))
}

async fn trucks_by_status(
    State(service): State<Arc<PermitService>>,
    Path(status): Path<String>,
) -> Result<Json<Vec<TruckWithOwner>>, PermitError> {
    let status: ApplicationStatus = status.parse().map_err(PermitError::Validation)?;
    Ok(Json(service.trucks_by_status(status)?))
}

async fn get_application(
    State(service): State<Arc<PermitService>>,
    Path(id): Path<u64>,
) -> Result<Json<Application>, PermitError> {
    Ok(Json(service.application(ApplicationId(id))?))
}

async fn application_documents(
    State(service): State<Arc<PermitService>>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<Document>>, PermitError> {
    Ok(Json(service.documents_for(ApplicationId(id))?))
}

async fn assign_reviewer(
    State(service): State<Arc<PermitService>>,
    Path(id): Path<u64>,
    Json(payload): Json<AssignReviewer>,
) -> Result<Json<Application>, PermitError> {
    let application = service.assign_reviewer(ApplicationId(id), payload.reviewer_id)?;
    Ok(Json(application))
}

async fn update_application_status(
    State(service): State<Arc<PermitService>>,
    Path((id, status)): Path<(u64, String)>,
) -> Result<Json<Application>, PermitError> {
    let status: ApplicationStatus = status.parse().map_err(PermitError::Validation)?;
    Ok(Json(
        service.update_application_status(ApplicationId(id), status)?,
    ))
}

async fn list_reviews(
    State(service): State<Arc<PermitService>>,
) -> Result<Json<Vec<Review>>, PermitError> {
    Ok(Json(service.reviews()?))
}

async fn get_review(
    State(service): State<Arc<PermitService>>,
    Path(id): Path<u64>,
) -> Result<Json<Review>, PermitError> {
    Ok(Json(service.review(ReviewId(id))?))
}

async fn update_review_status(
    State(service): State<Arc<PermitService>>,
    Path(id): Path<u64>,
    Json(payload): Json<ReviewStatusUpdate>,
) -> Result<Json<Review>, PermitError> {
    Ok(Json(
        service.update_review_status(ReviewId(id), payload.status)?,
    ))
}

async fn reviews_by_reviewer(
    State(service): State<Arc<PermitService>>,
    Path(id): Path<u64>,
    Query(page): Query<PageRequest>,
    Query(filter): Query<ReviewFilter>,
) -> Result<Json<Page<Review>>, PermitError> {
    Ok(Json(
        service.reviews_by_reviewer(UserId(id), &page, filter.status)?,
    ))
}

async fn reviewer_stats(
    State(service): State<Arc<PermitService>>,
    Path(id): Path<u64>,
) -> Result<Json<ReviewerStats>, PermitError> {
    Ok(Json(service.reviewer_stats(UserId(id))?))
}
