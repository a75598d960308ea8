use super::common::*;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::admin::domain::UserRole;
use crate::permits::router::permits_router;

fn post_json(uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn submit_route_creates_an_application() {
    let world = build_world();
    let (vendor, truck) = seed_truck(&world);
    let router = permits_router(world.permits.clone());

    let response = router
        .oneshot(post_json(
            "/api/applications",
            json!({
                "food_truck_id": truck.0,
                "vendor_id": vendor.0,
                "documents": [
                    { "document_name": "FSSAI licence", "file_path": "/uploads/licence.pdf" }
                ]
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("status"), Some(&json!("SUBMITTED")));
    assert_eq!(payload.get("food_truck_id"), Some(&json!(truck.0)));
}

#[tokio::test]
async fn duplicate_submission_returns_conflict() {
    let world = build_world();
    let (vendor, truck) = seed_truck(&world);
    world
        .permits
        .submit(submission(truck, vendor))
        .expect("first submission succeeds");
    let router = permits_router(world.permits.clone());

    let response = router
        .oneshot(post_json(
            "/api/applications",
            json!({ "food_truck_id": truck.0, "vendor_id": vendor.0 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let payload = read_json_body(response).await;
    assert!(payload.get("error").is_some());
}

#[tokio::test]
async fn listing_route_returns_a_page_envelope() {
    let world = build_world();
    let (vendor, truck) = seed_truck(&world);
    world
        .permits
        .submit(submission(truck, vendor))
        .expect("submission succeeds");
    let router = permits_router(world.permits.clone());

    let response = router
        .oneshot(
            Request::get("/api/applications?status=SUBMITTED&page=0&size=5")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("page"), Some(&json!(0)));
    assert_eq!(payload.get("total_items"), Some(&json!(1)));
    assert_eq!(
        payload
            .get("items")
            .and_then(|items| items.as_array())
            .map(|items| items.len()),
        Some(1)
    );
}

#[tokio::test]
async fn assign_reviewer_route_moves_the_application_to_in_review() {
    let world = build_world();
    let (vendor, truck) = seed_truck(&world);
    let reviewer = seed_user(&world, UserRole::Reviewer);
    let application = world
        .permits
        .submit(submission(truck, vendor))
        .expect("submission succeeds");
    let router = permits_router(world.permits.clone());

    let response = router
        .oneshot(post_json(
            &format!("/api/applications/assign-reviewer/{}", application.id.0),
            json!({ "reviewer_id": reviewer.0 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("status"), Some(&json!("IN_REVIEW")));
    assert!(payload.get("review_id").is_some());
}

#[tokio::test]
async fn unknown_status_token_is_a_bad_request() {
    let world = build_world();
    let (vendor, truck) = seed_truck(&world);
    let application = world
        .permits
        .submit(submission(truck, vendor))
        .expect("submission succeeds");
    let router = permits_router(world.permits.clone());

    let response = router
        .oneshot(
            Request::put(format!(
                "/api/applications/{}/status/ON_FIRE",
                application.id.0
            ))
            .body(Body::empty())
            .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn repository_outage_surfaces_as_internal_error() {
    let world = build_world();
    let service = Arc::new(crate::permits::service::PermitService::new(
        Arc::new(UnavailableApplications),
        Arc::new(crate::permits::repository::InMemoryDocumentRepository::default()),
        Arc::new(crate::permits::repository::InMemoryReviewRepository::default()),
        world.trucks.clone(),
        Arc::new(crate::catalog::repository::InMemoryBrandRepository::default()),
        Arc::new(crate::catalog::repository::InMemoryVendorRepository::default()),
        Arc::new(crate::admin::repository::InMemoryUserRepository::default()),
    ));
    let router = permits_router(service);

    let response = router
        .oneshot(
            Request::get("/api/applications")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn missing_application_returns_not_found() {
    let world = build_world();
    let router = permits_router(world.permits.clone());

    let response = router
        .oneshot(
            Request::get(format!("/api/applications/{}", u64::MAX))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
