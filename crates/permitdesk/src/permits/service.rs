use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;

use super::domain::{
    Application, ApplicationDetails, ApplicationId, ApplicationStatus, ApplicationSubmission,
    Document, DocumentId, Review, ReviewId, ReviewStatus, ReviewerStats, TruckWithOwner,
};
use super::repository::{ApplicationRepository, DocumentRepository, ReviewRepository};
use crate::admin::domain::{User, UserId, UserRole};
use crate::admin::repository::UserRepository;
use crate::catalog::domain::FoodTruck;
use crate::catalog::repository::{BrandRepository, FoodTruckRepository, VendorRepository};
use crate::pagination::{Page, PageRequest, SortDirection};
use crate::store::{RepositoryError, Sequence};

static APPLICATION_SEQUENCE: Sequence = Sequence::new();
static DOCUMENT_SEQUENCE: Sequence = Sequence::new();
static REVIEW_SEQUENCE: Sequence = Sequence::new();

fn next_application_id() -> ApplicationId {
    ApplicationId(APPLICATION_SEQUENCE.next())
}

fn next_document_id() -> DocumentId {
    DocumentId(DOCUMENT_SEQUENCE.next())
}

fn next_review_id() -> ReviewId {
    ReviewId(REVIEW_SEQUENCE.next())
}

/// Error raised by the permit workflow service.
#[derive(Debug, thiserror::Error)]
pub enum PermitError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("{entity} not found with id {id}")]
    NotFound { entity: &'static str, id: u64 },
    #[error("food truck already has a permit application")]
    AlreadySubmitted,
    #[error("application already has a review assigned")]
    AlreadyReviewed,
    #[error("user with id {0} is not a reviewer")]
    NotAReviewer(UserId),
    #[error("{0}")]
    Validation(String),
}

impl IntoResponse for PermitError {
    fn into_response(self) -> Response {
        let status = match &self {
            PermitError::NotFound { .. } | PermitError::Repository(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            PermitError::AlreadySubmitted
            | PermitError::AlreadyReviewed
            | PermitError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            PermitError::NotAReviewer(_) | PermitError::Validation(_) => StatusCode::BAD_REQUEST,
            PermitError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Intake, reviewer assignment, and status workflow for permit applications.
pub struct PermitService {
    applications: Arc<dyn ApplicationRepository>,
    documents: Arc<dyn DocumentRepository>,
    reviews: Arc<dyn ReviewRepository>,
    trucks: Arc<dyn FoodTruckRepository>,
    brands: Arc<dyn BrandRepository>,
    vendors: Arc<dyn VendorRepository>,
    users: Arc<dyn UserRepository>,
}

impl PermitService {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        documents: Arc<dyn DocumentRepository>,
        reviews: Arc<dyn ReviewRepository>,
        trucks: Arc<dyn FoodTruckRepository>,
        brands: Arc<dyn BrandRepository>,
        vendors: Arc<dyn VendorRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            applications,
            documents,
            reviews,
            trucks,
            brands,
            vendors,
            users,
        }
    }

    /// Submit a permit application for a food truck together with its
    /// supporting documents. One application per truck.
    pub fn submit(&self, submission: ApplicationSubmission) -> Result<Application, PermitError> {
        let truck = self.truck(submission.food_truck_id)?;
        self.vendors
            .fetch(submission.vendor_id)?
            .ok_or(PermitError::NotFound {
                entity: "vendor",
                id: submission.vendor_id.0,
            })?;
        if self
            .applications
            .find_by_food_truck(truck.id)?
            .is_some()
        {
            return Err(PermitError::AlreadySubmitted);
        }

        let application = Application {
            id: next_application_id(),
            food_truck_id: truck.id,
            vendor_id: submission.vendor_id,
            submission_date: Utc::now(),
            status: ApplicationStatus::Submitted,
            review_id: None,
        };
        let application = match self.applications.insert(application) {
            Ok(stored) => stored,
            Err(RepositoryError::Conflict) => return Err(PermitError::AlreadySubmitted),
            Err(other) => return Err(other.into()),
        };

        for new_document in submission.documents {
            let document = Document {
                id: next_document_id(),
                application_id: application.id,
                document_name: new_document.document_name,
                file_path: new_document.file_path,
            };
            self.documents.insert(document)?;
        }

        self.sync_truck_status(&application)?;
        tracing::info!(
            application_id = application.id.0,
            food_truck_id = application.food_truck_id.0,
            "permit application submitted"
        );
        Ok(application)
    }

    pub fn application(&self, id: ApplicationId) -> Result<Application, PermitError> {
        self.applications
            .fetch(id)?
            .ok_or(PermitError::NotFound { entity: "application", id: id.0 })
    }

    pub fn applications(
        &self,
        request: &PageRequest,
        status: Option<ApplicationStatus>,
    ) -> Result<Page<Application>, PermitError> {
        let applications = match status {
            Some(status) => self.applications.list_by_status(status)?,
            None => self.applications.list()?,
        };
        Ok(Page::from_sorted(
            sort_applications(applications, request),
            request,
        ))
    }

    /// Applications that still need a reviewer.
    pub fn unassigned(&self, request: &PageRequest) -> Result<Page<Application>, PermitError> {
        let mut applications = self.applications.list()?;
        applications.retain(|application| application.review_id.is_none());
        Ok(Page::from_sorted(
            sort_applications(applications, request),
            request,
        ))
    }

    /// Applications joined with truck, brand, vendor, and reviewer context.
    pub fn details(
        &self,
        request: &PageRequest,
        status: Option<ApplicationStatus>,
    ) -> Result<Page<ApplicationDetails>, PermitError> {
        let page = self.applications(request, status)?;
        let mut items = Vec::with_capacity(page.items.len());
        for application in &page.items {
            match self.detail_view(application) {
                Ok(view) => items.push(view),
                // Applications whose truck or owner was deleted stay out of
                // the joined listing instead of failing it.
                Err(PermitError::NotFound { .. }) => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(Page {
            items,
            page: page.page,
            size: page.size,
            total_items: page.total_items,
            total_pages: page.total_pages,
        })
    }

    /// Trucks whose application currently carries the given status, joined
    /// with owner contact details.
    pub fn trucks_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<TruckWithOwner>, PermitError> {
        let mut views = Vec::new();
        for application in self.applications.list_by_status(status)? {
            let truck = match self.truck(application.food_truck_id) {
                Ok(truck) => truck,
                Err(PermitError::NotFound { .. }) => continue,
                Err(err) => return Err(err),
            };
            let (brand_name, vendor_name, vendor_email) = self.owner_context(&truck)?;
            views.push(TruckWithOwner {
                food_truck_id: truck.id,
                brand_name,
                vendor_name,
                vendor_email,
                operating_region: truck.operating_region,
                location: truck.location,
                cuisine_specialties: truck.cuisine_specialties,
                menu_highlights: truck.menu_highlights,
            });
        }
        Ok(views)
    }

    pub fn reviewers(&self) -> Result<Vec<User>, PermitError> {
        Ok(self.users.list_by_role(UserRole::Reviewer)?)
    }

    pub fn documents_for(&self, id: ApplicationId) -> Result<Vec<Document>, PermitError> {
        self.application(id)?;
        Ok(self.documents.list_by_application(id)?)
    }

    /// Assign a reviewer to an application: creates the IN_PROGRESS review
    /// and moves the application to IN_REVIEW. Fails without mutating state
    /// when the application is missing, already reviewed, or the user is not
    /// a reviewer.
    pub fn assign_reviewer(
        &self,
        application_id: ApplicationId,
        reviewer_id: UserId,
    ) -> Result<Application, PermitError> {
        let mut application = self.application(application_id)?;
        let reviewer = self
            .users
            .fetch(reviewer_id)?
            .ok_or(PermitError::NotFound { entity: "user", id: reviewer_id.0 })?;

        if reviewer.role != UserRole::Reviewer {
            return Err(PermitError::NotAReviewer(reviewer_id));
        }
        if application.review_id.is_some() {
            return Err(PermitError::AlreadyReviewed);
        }

        let review = Review {
            id: next_review_id(),
            application_id,
            reviewer_id,
            review_date: Utc::now(),
            review_status: ReviewStatus::InProgress,
        };
        // The repository also enforces one review per application, so a
        // racing assignment surfaces as a conflict instead of a duplicate.
        let review = match self.reviews.insert(review) {
            Ok(stored) => stored,
            Err(RepositoryError::Conflict) => return Err(PermitError::AlreadyReviewed),
            Err(other) => return Err(other.into()),
        };

        application.review_id = Some(review.id);
        application.status = ApplicationStatus::InReview;
        self.save_application(&application)?;

        tracing::info!(
            application_id = application.id.0,
            reviewer_id = reviewer_id.0,
            "reviewer assigned"
        );
        Ok(application)
    }

    /// Record a review outcome and cascade it onto the linked application.
    /// There is no guard against re-transitioning a terminal review.
    pub fn update_review_status(
        &self,
        review_id: ReviewId,
        new_status: ReviewStatus,
    ) -> Result<Review, PermitError> {
        let mut review = self.review(review_id)?;
        review.review_status = new_status;
        review.review_date = Utc::now();
        self.reviews.update(review.clone())?;

        if let Some(mut application) = self.applications.fetch(review.application_id)? {
            application.status = new_status.application_status();
            self.save_application(&application)?;
        }

        Ok(review)
    }

    /// Direct admin override of an application's status.
    pub fn update_application_status(
        &self,
        application_id: ApplicationId,
        new_status: ApplicationStatus,
    ) -> Result<Application, PermitError> {
        let mut application = self.application(application_id)?;
        application.status = new_status;
        self.save_application(&application)?;
        Ok(application)
    }

    pub fn review(&self, id: ReviewId) -> Result<Review, PermitError> {
        self.reviews
            .fetch(id)?
            .ok_or(PermitError::NotFound { entity: "review", id: id.0 })
    }

    pub fn reviews(&self) -> Result<Vec<Review>, PermitError> {
        Ok(self.reviews.list()?)
    }

    pub fn reviews_by_reviewer(
        &self,
        reviewer_id: UserId,
        request: &PageRequest,
        status: Option<ReviewStatus>,
    ) -> Result<Page<Review>, PermitError> {
        let mut reviews = self.reviews.list_by_reviewer(reviewer_id)?;
        if let Some(status) = status {
            reviews.retain(|review| review.review_status == status);
        }
        Ok(Page::from_sorted(sort_reviews(reviews, request), request))
    }

    pub fn reviewer_stats(&self, reviewer_id: UserId) -> Result<ReviewerStats, PermitError> {
        let reviews = self.reviews.list_by_reviewer(reviewer_id)?;
        let total_reviews = reviews.len();
        let pending_reviews = reviews
            .iter()
            .filter(|review| review.review_status == ReviewStatus::InProgress)
            .count();
        let approved_reviews = reviews
            .iter()
            .filter(|review| review.review_status == ReviewStatus::Approved)
            .count();
        let rejected_reviews = reviews
            .iter()
            .filter(|review| review.review_status == ReviewStatus::Rejected)
            .count();

        let decided = approved_reviews + rejected_reviews;
        let approval_rate = if decided == 0 {
            0.0
        } else {
            approved_reviews as f64 / decided as f64 * 100.0
        };

        Ok(ReviewerStats {
            total_reviews,
            pending_reviews,
            approved_reviews,
            rejected_reviews,
            approval_rate,
        })
    }

    /// Persist an application and re-synchronize the truck's denormalized
    /// status. Every application write funnels through here so the
    /// `FoodTruck.application_status == Application.status` invariant holds.
    fn save_application(&self, application: &Application) -> Result<(), PermitError> {
        self.applications.update(application.clone())?;
        self.sync_truck_status(application)
    }

    fn sync_truck_status(&self, application: &Application) -> Result<(), PermitError> {
        if let Some(mut truck) = self.trucks.fetch(application.food_truck_id)? {
            truck.application_status = Some(application.status);
            self.trucks.update(truck)?;
        }
        Ok(())
    }

    fn truck(&self, id: crate::catalog::domain::FoodTruckId) -> Result<FoodTruck, PermitError> {
        self.trucks
            .fetch(id)?
            .ok_or(PermitError::NotFound { entity: "food truck", id: id.0 })
    }

    fn detail_view(&self, application: &Application) -> Result<ApplicationDetails, PermitError> {
        let truck = self.truck(application.food_truck_id)?;
        let (brand_name, vendor_name, vendor_email) = self.owner_context(&truck)?;
        let reviewer_name = match application.review_id {
            Some(review_id) => {
                let review = self.review(review_id)?;
                self.users
                    .fetch(review.reviewer_id)?
                    .map(|reviewer| reviewer.name)
            }
            None => None,
        };

        Ok(ApplicationDetails {
            application_id: application.id,
            submission_date: application.submission_date,
            status: application.status,
            food_truck_id: truck.id,
            location: truck.location,
            operating_region: truck.operating_region,
            cuisine_specialties: truck.cuisine_specialties,
            brand_name,
            vendor_name,
            vendor_email,
            review_id: application.review_id,
            reviewer_name,
        })
    }

    fn owner_context(&self, truck: &FoodTruck) -> Result<(String, String, String), PermitError> {
        let brand = self
            .brands
            .fetch(truck.brand_id)?
            .ok_or(PermitError::NotFound { entity: "brand", id: truck.brand_id.0 })?;
        let vendor = self
            .vendors
            .fetch(brand.vendor_id)?
            .ok_or(PermitError::NotFound { entity: "vendor", id: brand.vendor_id.0 })?;
        Ok((brand.name, vendor.name, vendor.email))
    }
}

fn sort_applications(mut applications: Vec<Application>, request: &PageRequest) -> Vec<Application> {
    match request.sort_key() {
        "submission_date" | "submissionDate" => {
            applications.sort_by_key(|application| application.submission_date)
        }
        "status" => applications.sort_by_key(|application| application.status.label()),
        _ => applications.sort_by_key(|application| application.id.0),
    }
    if request.sort_direction == SortDirection::Desc {
        applications.reverse();
    }
    applications
}

fn sort_reviews(mut reviews: Vec<Review>, request: &PageRequest) -> Vec<Review> {
    match request.sort_key() {
        "review_date" | "reviewDate" => reviews.sort_by_key(|review| review.review_date),
        "review_status" | "reviewStatus" => {
            reviews.sort_by_key(|review| review.review_status.label())
        }
        _ => reviews.sort_by_key(|review| review.id.0),
    }
    if request.sort_direction == SortDirection::Desc {
        reviews.reverse();
    }
    reviews
}
