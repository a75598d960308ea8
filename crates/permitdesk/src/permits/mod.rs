//! Permit application intake, reviewer assignment, and the application
//! status workflow. This is the one area with real decision logic: review
//! outcomes cascade onto the application, and the food truck's denormalized
//! status is re-synchronized on every application save.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationDetails, ApplicationId, ApplicationStatus, ApplicationSubmission,
    Document, DocumentId, NewDocument, Review, ReviewId, ReviewStatus, ReviewerStats,
    TruckWithOwner,
};
pub use repository::{
    ApplicationRepository, DocumentRepository, InMemoryApplicationRepository,
    InMemoryDocumentRepository, InMemoryReviewRepository, ReviewRepository,
};
pub use router::permits_router;
pub use service::{PermitError, PermitService};
