use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use super::domain::{AdminRequest, AdminRequestId, NewUser, User, UserId, UserRole, UserUpdate};
use super::service::{AdminError, AdminRequestService, UserService};

/// Shared state for the account-management surface.
#[derive(Clone)]
pub struct AdminState {
    pub users: Arc<UserService>,
    pub requests: Arc<AdminRequestService>,
}

#[derive(Debug, Deserialize)]
pub struct NewAdminRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub super_admin_id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub super_admin_id: UserId,
    pub reason: String,
}

/// Routes under `/api/users` and `/api/superadmin`.
pub fn admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/api/users", post(register_user).get(list_users))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/users/role/:role", get(users_by_role))
        .route(
            "/api/superadmin/users",
            post(create_managed_user).get(managed_users),
        )
        .route(
            "/api/superadmin/requests",
            post(create_request).get(list_requests),
        )
        .route("/api/superadmin/requests/pending", get(pending_requests))
        .route("/api/superadmin/requests/:id/approve", post(approve_request))
        .route("/api/superadmin/requests/:id/reject", post(reject_request))
        .with_state(state)
}

async fn register_user(
    State(state): State<AdminState>,
    Json(new_user): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), AdminError> {
    let user = state.users.register(new_user)?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_users(State(state): State<AdminState>) -> Result<Json<Vec<User>>, AdminError> {
    Ok(Json(state.users.list()?))
}

async fn get_user(
    State(state): State<AdminState>,
    Path(id): Path<u64>,
) -> Result<Json<User>, AdminError> {
    Ok(Json(state.users.get(UserId(id))?))
}

async fn update_user(
    State(state): State<AdminState>,
    Path(id): Path<u64>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<User>, AdminError> {
    Ok(Json(state.users.update_profile(UserId(id), update)?))
}

async fn delete_user(
    State(state): State<AdminState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AdminError> {
    state.users.delete(UserId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn users_by_role(
    State(state): State<AdminState>,
    Path(role): Path<String>,
) -> Result<Json<Vec<User>>, AdminError> {
    let role: UserRole = role.parse().map_err(AdminError::Validation)?;
    Ok(Json(state.users.by_role(role)?))
}

async fn managed_users(State(state): State<AdminState>) -> Result<Json<Vec<User>>, AdminError> {
    Ok(Json(state.users.managed_users()?))
}

async fn create_managed_user(
    State(state): State<AdminState>,
    Json(new_user): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), AdminError> {
    let user = state.users.create_managed(new_user)?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn create_request(
    State(state): State<AdminState>,
    Json(payload): Json<NewAdminRequest>,
) -> Result<(StatusCode, Json<AdminRequest>), AdminError> {
    let request = state
        .requests
        .create(payload.name, payload.email, payload.password)?;
    Ok((StatusCode::CREATED, Json(request)))
}

async fn list_requests(
    State(state): State<AdminState>,
) -> Result<Json<Vec<AdminRequest>>, AdminError> {
    Ok(Json(state.requests.all()?))
}

async fn pending_requests(
    State(state): State<AdminState>,
) -> Result<Json<Vec<AdminRequest>>, AdminError> {
    Ok(Json(state.requests.pending()?))
}

async fn approve_request(
    State(state): State<AdminState>,
    Path(id): Path<u64>,
    Json(payload): Json<ApproveRequest>,
) -> Result<Json<AdminRequest>, AdminError> {
    let request = state
        .requests
        .approve(AdminRequestId(id), payload.super_admin_id)?;
    Ok(Json(request))
}

async fn reject_request(
    State(state): State<AdminState>,
    Path(id): Path<u64>,
    Json(payload): Json<RejectRequest>,
) -> Result<Json<AdminRequest>, AdminError> {
    let request =
        state
            .requests
            .reject(AdminRequestId(id), payload.super_admin_id, payload.reason)?;
    Ok(Json(request))
}
