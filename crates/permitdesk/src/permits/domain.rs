use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::admin::domain::UserId;
use crate::catalog::domain::{FoodTruckId, VendorId};

/// Identifier wrapper for permit applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub u64);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(pub u64);

/// Lifecycle of a permit application. Transitions are driven by review
/// outcomes and admin overrides, never computed from inspection results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Submitted,
    InReview,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::InReview => "IN_REVIEW",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SUBMITTED" => Ok(Self::Submitted),
            "IN_REVIEW" => Ok(Self::InReview),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(format!("unknown application status '{other}'")),
        }
    }
}

/// Outcome of a reviewer's evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    InProgress,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// The application status a review outcome cascades to.
    pub fn application_status(self) -> ApplicationStatus {
        match self {
            Self::Approved => ApplicationStatus::Approved,
            Self::Rejected => ApplicationStatus::Rejected,
            Self::InProgress => ApplicationStatus::InReview,
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "IN_PROGRESS" => Ok(Self::InProgress),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(format!("unknown review status '{other}'")),
        }
    }
}

/// Permit request tied one-to-one to a food truck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub food_truck_id: FoodTruckId,
    pub vendor_id: VendorId,
    pub submission_date: DateTime<Utc>,
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_id: Option<ReviewId>,
}

/// Supporting document attached at submission, cascade-deleted with its
/// application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub application_id: ApplicationId,
    pub document_name: String,
    pub file_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDocument {
    pub document_name: String,
    pub file_path: String,
}

/// Intake payload for a new permit application.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSubmission {
    pub food_truck_id: FoodTruckId,
    pub vendor_id: VendorId,
    #[serde(default)]
    pub documents: Vec<NewDocument>,
}

/// A reviewer's evaluation of one application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub application_id: ApplicationId,
    pub reviewer_id: UserId,
    pub review_date: DateTime<Utc>,
    pub review_status: ReviewStatus,
}

/// Application joined with truck, brand, vendor, and reviewer context for
/// listing screens.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDetails {
    pub application_id: ApplicationId,
    pub submission_date: DateTime<Utc>,
    pub status: ApplicationStatus,
    pub food_truck_id: FoodTruckId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub operating_region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine_specialties: Option<String>,
    pub brand_name: String,
    pub vendor_name: String,
    pub vendor_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_id: Option<ReviewId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_name: Option<String>,
}

/// Food truck joined with its owning brand and vendor contact details.
#[derive(Debug, Clone, Serialize)]
pub struct TruckWithOwner {
    pub food_truck_id: FoodTruckId,
    pub brand_name: String,
    pub vendor_name: String,
    pub vendor_email: String,
    pub operating_region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine_specialties: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_highlights: Option<String>,
}

/// Workload counters for a single reviewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewerStats {
    pub total_reviews: usize,
    pub pending_reviews: usize,
    pub approved_reviews: usize,
    pub rejected_reviews: usize,
    pub approval_rate: f64,
}
