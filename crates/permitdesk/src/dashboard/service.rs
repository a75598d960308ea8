use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::admin::domain::UserRole;
use crate::admin::repository::UserRepository;
use crate::catalog::repository::{FoodTruckRepository, VendorRepository};
use crate::inspections::domain::InspectionResult;
use crate::inspections::repository::InspectionRepository;
use crate::permits::domain::{ApplicationStatus, ReviewStatus};
use crate::permits::repository::{ApplicationRepository, ReviewRepository};
use crate::store::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Aggregate counters across every workflow area. Keys stay camelCase for
/// the admin frontend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_admins: usize,
    pub total_inspectors: usize,
    pub total_reviewers: usize,
    pub total_vendors: usize,
    pub total_applications: usize,
    pub submitted_applications: usize,
    pub approved_applications: usize,
    pub rejected_applications: usize,
    pub total_food_trucks: usize,
    pub total_inspections: usize,
    pub passed_inspections: usize,
    pub failed_inspections: usize,
    pub pending_inspections: usize,
    pub total_reviews: usize,
    pub approved_reviews: usize,
    pub rejected_reviews: usize,
    pub pending_reviews: usize,
    pub application_approval_rate: f64,
    pub inspection_pass_rate: f64,
    pub review_approval_rate: f64,
}

/// Read-only aggregation over the in-memory stores. Every counter is an
/// O(n) scan, acceptable at the data volumes the platform sees.
pub struct DashboardService {
    users: Arc<dyn UserRepository>,
    vendors: Arc<dyn VendorRepository>,
    trucks: Arc<dyn FoodTruckRepository>,
    applications: Arc<dyn ApplicationRepository>,
    reviews: Arc<dyn ReviewRepository>,
    inspections: Arc<dyn InspectionRepository>,
}

impl DashboardService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        vendors: Arc<dyn VendorRepository>,
        trucks: Arc<dyn FoodTruckRepository>,
        applications: Arc<dyn ApplicationRepository>,
        reviews: Arc<dyn ReviewRepository>,
        inspections: Arc<dyn InspectionRepository>,
    ) -> Self {
        Self {
            users,
            vendors,
            trucks,
            applications,
            reviews,
            inspections,
        }
    }

    pub fn stats(&self) -> Result<DashboardStats, DashboardError> {
        let users = self.users.list()?;
        let total_admins = users
            .iter()
            .filter(|user| user.role == UserRole::Admin)
            .count();
        let total_inspectors = users
            .iter()
            .filter(|user| user.role == UserRole::Inspector)
            .count();
        let total_reviewers = users
            .iter()
            .filter(|user| user.role == UserRole::Reviewer)
            .count();

        let total_vendors = self.vendors.list()?.len();
        let total_food_trucks = self.trucks.list()?.len();

        // Platform headcount counts staff roles plus vendor accounts. Super
        // admin accounts stay out of the tally.
        let total_users = total_admins + total_inspectors + total_reviewers + total_vendors;

        let applications = self.applications.list()?;
        let total_applications = applications.len();
        let submitted_applications = applications
            .iter()
            .filter(|application| application.status == ApplicationStatus::Submitted)
            .count();
        let approved_applications = applications
            .iter()
            .filter(|application| application.status == ApplicationStatus::Approved)
            .count();
        let rejected_applications = applications
            .iter()
            .filter(|application| application.status == ApplicationStatus::Rejected)
            .count();

        let inspections = self.inspections.list()?;
        let total_inspections = inspections.len();
        let passed_inspections = inspections
            .iter()
            .filter(|inspection| inspection.result == InspectionResult::Pass)
            .count();
        let failed_inspections = inspections
            .iter()
            .filter(|inspection| inspection.result == InspectionResult::Fail)
            .count();
        let pending_inspections = inspections
            .iter()
            .filter(|inspection| inspection.result == InspectionResult::InProgress)
            .count();

        let reviews = self.reviews.list()?;
        let total_reviews = reviews.len();
        let approved_reviews = reviews
            .iter()
            .filter(|review| review.review_status == ReviewStatus::Approved)
            .count();
        let rejected_reviews = reviews
            .iter()
            .filter(|review| review.review_status == ReviewStatus::Rejected)
            .count();
        let pending_reviews = reviews
            .iter()
            .filter(|review| review.review_status == ReviewStatus::InProgress)
            .count();

        Ok(DashboardStats {
            total_users,
            total_admins,
            total_inspectors,
            total_reviewers,
            total_vendors,
            total_applications,
            submitted_applications,
            approved_applications,
            rejected_applications,
            total_food_trucks,
            total_inspections,
            passed_inspections,
            failed_inspections,
            pending_inspections,
            total_reviews,
            approved_reviews,
            rejected_reviews,
            pending_reviews,
            application_approval_rate: rate(approved_applications, total_applications),
            inspection_pass_rate: rate(passed_inspections, total_inspections),
            review_approval_rate: rate(approved_reviews, total_reviews),
        })
    }
}

/// Percentage rounded to one decimal place, 0.0 when the denominator is zero.
fn rate(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = part as f64 / whole as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}
