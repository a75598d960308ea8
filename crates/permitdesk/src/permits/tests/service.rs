use super::common::*;

use crate::admin::domain::UserRole;
use crate::catalog::repository::FoodTruckRepository;
use crate::pagination::{PageRequest, SortDirection};
use crate::permits::domain::{ApplicationId, ApplicationStatus, ReviewStatus};
use crate::permits::service::PermitError;

#[test]
fn submission_starts_the_workflow_and_marks_the_truck() {
    let world = build_world();
    let (vendor, truck) = seed_truck(&world);

    let application = world
        .permits
        .submit(submission(truck, vendor))
        .expect("submission succeeds");

    assert_eq!(application.status, ApplicationStatus::Submitted);
    assert!(application.review_id.is_none());

    let documents = world
        .permits
        .documents_for(application.id)
        .expect("documents stored");
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].document_name, "FSSAI licence");

    let stored_truck = world
        .trucks
        .fetch(truck)
        .expect("store reachable")
        .expect("truck exists");
    assert_eq!(
        stored_truck.application_status,
        Some(ApplicationStatus::Submitted)
    );
}

#[test]
fn one_application_per_truck() {
    let world = build_world();
    let (vendor, truck) = seed_truck(&world);

    world
        .permits
        .submit(submission(truck, vendor))
        .expect("first submission succeeds");
    let err = world
        .permits
        .submit(submission(truck, vendor))
        .expect_err("second submission must fail");
    assert!(matches!(err, PermitError::AlreadySubmitted));
}

#[test]
fn submission_requires_an_existing_truck() {
    let world = build_world();
    let (vendor, _) = seed_truck(&world);

    let err = world
        .permits
        .submit(submission(crate::catalog::domain::FoodTruckId(u64::MAX), vendor))
        .expect_err("unknown truck must fail");
    assert!(matches!(err, PermitError::NotFound { entity: "food truck", .. }));
}

#[test]
fn reviewer_assignment_opens_a_review_and_moves_to_in_review() {
    let world = build_world();
    let (vendor, truck) = seed_truck(&world);
    let reviewer = seed_user(&world, UserRole::Reviewer);

    let application = world
        .permits
        .submit(submission(truck, vendor))
        .expect("submission succeeds");
    let application = world
        .permits
        .assign_reviewer(application.id, reviewer)
        .expect("assignment succeeds");

    assert_eq!(application.status, ApplicationStatus::InReview);
    let review_id = application.review_id.expect("review linked");
    let review = world.permits.review(review_id).expect("review stored");
    assert_eq!(review.review_status, ReviewStatus::InProgress);
    assert_eq!(review.reviewer_id, reviewer);

    let stored_truck = world
        .trucks
        .fetch(truck)
        .expect("store reachable")
        .expect("truck exists");
    assert_eq!(
        stored_truck.application_status,
        Some(ApplicationStatus::InReview)
    );
}

#[test]
fn assignment_guards_fail_without_mutating_state() {
    let world = build_world();
    let (vendor, truck) = seed_truck(&world);
    let inspector = seed_user(&world, UserRole::Inspector);

    let application = world
        .permits
        .submit(submission(truck, vendor))
        .expect("submission succeeds");

    let err = world
        .permits
        .assign_reviewer(application.id, inspector)
        .expect_err("inspector must be refused");
    assert!(matches!(err, PermitError::NotAReviewer(_)));

    let unchanged = world
        .permits
        .application(application.id)
        .expect("application still present");
    assert_eq!(unchanged.status, ApplicationStatus::Submitted);
    assert!(unchanged.review_id.is_none());
    assert!(world.permits.reviews().expect("listing").is_empty());
}

#[test]
fn second_assignment_is_refused() {
    let world = build_world();
    let (vendor, truck) = seed_truck(&world);
    let first = seed_user(&world, UserRole::Reviewer);
    let second = seed_user(&world, UserRole::Reviewer);

    let application = world
        .permits
        .submit(submission(truck, vendor))
        .expect("submission succeeds");
    world
        .permits
        .assign_reviewer(application.id, first)
        .expect("first assignment succeeds");

    let err = world
        .permits
        .assign_reviewer(application.id, second)
        .expect_err("second assignment must fail");
    assert!(matches!(err, PermitError::AlreadyReviewed));
}

#[test]
fn review_approval_cascades_to_application_and_truck() {
    let world = build_world();
    let (vendor, truck) = seed_truck(&world);
    let reviewer = seed_user(&world, UserRole::Reviewer);

    let application = world
        .permits
        .submit(submission(truck, vendor))
        .expect("submission succeeds");
    let application = world
        .permits
        .assign_reviewer(application.id, reviewer)
        .expect("assignment succeeds");
    let review_id = application.review_id.expect("review linked");

    world
        .permits
        .update_review_status(review_id, ReviewStatus::Approved)
        .expect("approval recorded");

    let application = world
        .permits
        .application(application.id)
        .expect("application present");
    assert_eq!(application.status, ApplicationStatus::Approved);

    let stored_truck = world
        .trucks
        .fetch(truck)
        .expect("store reachable")
        .expect("truck exists");
    assert_eq!(
        stored_truck.application_status,
        Some(ApplicationStatus::Approved)
    );
}

#[test]
fn review_rejection_cascades_and_reopening_moves_back_to_in_review() {
    let world = build_world();
    let (vendor, truck) = seed_truck(&world);
    let reviewer = seed_user(&world, UserRole::Reviewer);

    let application = world
        .permits
        .submit(submission(truck, vendor))
        .expect("submission succeeds");
    let application = world
        .permits
        .assign_reviewer(application.id, reviewer)
        .expect("assignment succeeds");
    let review_id = application.review_id.expect("review linked");

    world
        .permits
        .update_review_status(review_id, ReviewStatus::Rejected)
        .expect("rejection recorded");
    assert_eq!(
        world
            .permits
            .application(application.id)
            .expect("application present")
            .status,
        ApplicationStatus::Rejected
    );

    // Terminal reviews can be reopened; the application follows.
    world
        .permits
        .update_review_status(review_id, ReviewStatus::InProgress)
        .expect("reopen recorded");
    assert_eq!(
        world
            .permits
            .application(application.id)
            .expect("application present")
            .status,
        ApplicationStatus::InReview
    );
}

#[test]
fn direct_status_override_keeps_the_truck_in_sync() {
    let world = build_world();
    let (vendor, truck) = seed_truck(&world);

    let application = world
        .permits
        .submit(submission(truck, vendor))
        .expect("submission succeeds");
    world
        .permits
        .update_application_status(application.id, ApplicationStatus::Approved)
        .expect("override succeeds");

    let stored_truck = world
        .trucks
        .fetch(truck)
        .expect("store reachable")
        .expect("truck exists");
    assert_eq!(
        stored_truck.application_status,
        Some(ApplicationStatus::Approved)
    );
}

#[test]
fn unassigned_listing_drops_applications_once_reviewed() {
    let world = build_world();
    let reviewer = seed_user(&world, UserRole::Reviewer);

    let (vendor_a, truck_a) = seed_truck(&world);
    let (vendor_b, truck_b) = seed_truck(&world);
    let first = world
        .permits
        .submit(submission(truck_a, vendor_a))
        .expect("first submission");
    let second = world
        .permits
        .submit(submission(truck_b, vendor_b))
        .expect("second submission");

    world
        .permits
        .assign_reviewer(first.id, reviewer)
        .expect("assignment succeeds");

    let page = world
        .permits
        .unassigned(&PageRequest::default())
        .expect("listing succeeds");
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, second.id);
}

#[test]
fn listings_paginate_and_sort() {
    let world = build_world();
    let mut ids = Vec::new();
    for _ in 0..3 {
        let (vendor, truck) = seed_truck(&world);
        ids.push(
            world
                .permits
                .submit(submission(truck, vendor))
                .expect("submission succeeds")
                .id,
        );
    }

    let request = PageRequest {
        page: 0,
        size: 2,
        sort_by: Some("id".to_string()),
        sort_direction: SortDirection::Desc,
    };
    let page = world
        .permits
        .applications(&request, None)
        .expect("listing succeeds");

    assert_eq!(page.total_items, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].id, *ids.last().expect("three submissions"));
}

#[test]
fn details_join_owner_and_reviewer_context() {
    let world = build_world();
    let (vendor, truck) = seed_truck(&world);
    let reviewer = seed_user(&world, UserRole::Reviewer);

    let application = world
        .permits
        .submit(submission(truck, vendor))
        .expect("submission succeeds");
    world
        .permits
        .assign_reviewer(application.id, reviewer)
        .expect("assignment succeeds");

    let page = world
        .permits
        .details(&PageRequest::default(), Some(ApplicationStatus::InReview))
        .expect("details listing");
    let details = page
        .items
        .iter()
        .find(|details| details.application_id == application.id)
        .expect("application listed");

    assert_eq!(details.operating_region, "Chennai");
    assert!(details.brand_name.starts_with("Dosa Express"));
    assert_eq!(details.reviewer_name.as_deref(), Some("Workflow User"));
}

#[test]
fn joined_listings_skip_applications_whose_truck_was_deleted() {
    let world = build_world();
    let (vendor_a, truck_a) = seed_truck(&world);
    let (vendor_b, truck_b) = seed_truck(&world);

    let kept = world
        .permits
        .submit(submission(truck_a, vendor_a))
        .expect("submission succeeds");
    let orphaned = world
        .permits
        .submit(submission(truck_b, vendor_b))
        .expect("submission succeeds");
    world.trucks.delete(truck_b).expect("truck removed");

    let page = world
        .permits
        .details(&PageRequest::default(), Some(ApplicationStatus::Submitted))
        .expect("details listing");
    assert!(page
        .items
        .iter()
        .any(|details| details.application_id == kept.id));
    assert!(page
        .items
        .iter()
        .all(|details| details.application_id != orphaned.id));

    let trucks = world
        .permits
        .trucks_by_status(ApplicationStatus::Submitted)
        .expect("truck listing");
    assert!(trucks.iter().all(|view| view.food_truck_id != truck_b));
}

#[test]
fn reviewer_stats_count_decided_reviews_only() {
    let world = build_world();
    let reviewer = seed_user(&world, UserRole::Reviewer);

    let mut review_ids = Vec::new();
    for _ in 0..3 {
        let (vendor, truck) = seed_truck(&world);
        let application = world
            .permits
            .submit(submission(truck, vendor))
            .expect("submission succeeds");
        let application = world
            .permits
            .assign_reviewer(application.id, reviewer)
            .expect("assignment succeeds");
        review_ids.push(application.review_id.expect("review linked"));
    }

    world
        .permits
        .update_review_status(review_ids[0], ReviewStatus::Approved)
        .expect("approval recorded");
    world
        .permits
        .update_review_status(review_ids[1], ReviewStatus::Rejected)
        .expect("rejection recorded");

    let stats = world
        .permits
        .reviewer_stats(reviewer)
        .expect("stats compute");
    assert_eq!(stats.total_reviews, 3);
    assert_eq!(stats.pending_reviews, 1);
    assert_eq!(stats.approved_reviews, 1);
    assert_eq!(stats.rejected_reviews, 1);
    assert!((stats.approval_rate - 50.0).abs() < f64::EPSILON);
}

#[test]
fn missing_application_is_reported_as_not_found() {
    let world = build_world();
    let err = world
        .permits
        .application(ApplicationId(u64::MAX))
        .expect_err("must not exist");
    assert!(matches!(err, PermitError::NotFound { entity: "application", .. }));
}
