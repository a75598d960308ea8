use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{
    Application, ApplicationId, ApplicationStatus, Document, DocumentId, Review, ReviewId,
};
use crate::admin::domain::UserId;
use crate::catalog::domain::FoodTruckId;
use crate::store::RepositoryError;

/// Storage abstraction for permit applications. At most one application may
/// exist per food truck; `insert` must reject a second.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError>;
    fn update(&self, application: Application) -> Result<(), RepositoryError>;
    fn fetch(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn find_by_food_truck(
        &self,
        truck_id: FoodTruckId,
    ) -> Result<Option<Application>, RepositoryError>;
    fn list(&self) -> Result<Vec<Application>, RepositoryError>;
    fn list_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>, RepositoryError>;
    fn delete(&self, id: ApplicationId) -> Result<(), RepositoryError>;
}

/// Storage abstraction for supporting documents.
pub trait DocumentRepository: Send + Sync {
    fn insert(&self, document: Document) -> Result<Document, RepositoryError>;
    fn fetch(&self, id: DocumentId) -> Result<Option<Document>, RepositoryError>;
    fn list_by_application(
        &self,
        application_id: ApplicationId,
    ) -> Result<Vec<Document>, RepositoryError>;
    fn delete_by_application(&self, application_id: ApplicationId)
        -> Result<(), RepositoryError>;
}

/// Storage abstraction for reviews. One review per application is a hard
/// constraint here rather than a service-level check, so two racing
/// assignments cannot both succeed.
pub trait ReviewRepository: Send + Sync {
    fn insert(&self, review: Review) -> Result<Review, RepositoryError>;
    fn update(&self, review: Review) -> Result<(), RepositoryError>;
    fn fetch(&self, id: ReviewId) -> Result<Option<Review>, RepositoryError>;
    fn find_by_application(
        &self,
        application_id: ApplicationId,
    ) -> Result<Option<Review>, RepositoryError>;
    fn list(&self) -> Result<Vec<Review>, RepositoryError>;
    fn list_by_reviewer(&self, reviewer_id: UserId) -> Result<Vec<Review>, RepositoryError>;
}

#[derive(Default, Clone)]
pub struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, Application>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        if guard.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        if guard
            .values()
            .any(|existing| existing.food_truck_id == application.food_truck_id)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(application.id, application.clone());
        Ok(application)
    }

    fn update(&self, application: Application) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        if guard.contains_key(&application.id) {
            guard.insert(application.id, application);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn find_by_food_truck(
        &self,
        truck_id: FoodTruckId,
    ) -> Result<Option<Application>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard
            .values()
            .find(|application| application.food_truck_id == truck_id)
            .cloned())
    }

    fn list(&self) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        let mut applications: Vec<Application> = guard.values().cloned().collect();
        applications.sort_by_key(|application| application.id.0);
        Ok(applications)
    }

    fn list_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>, RepositoryError> {
        let mut applications = self.list()?;
        applications.retain(|application| application.status == status);
        Ok(applications)
    }

    fn delete(&self, id: ApplicationId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        guard.remove(&id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryDocumentRepository {
    records: Arc<Mutex<HashMap<DocumentId, Document>>>,
}

impl DocumentRepository for InMemoryDocumentRepository {
    fn insert(&self, document: Document) -> Result<Document, RepositoryError> {
        let mut guard = self.records.lock().expect("document mutex poisoned");
        if guard.contains_key(&document.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(document.id, document.clone());
        Ok(document)
    }

    fn fetch(&self, id: DocumentId) -> Result<Option<Document>, RepositoryError> {
        let guard = self.records.lock().expect("document mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn list_by_application(
        &self,
        application_id: ApplicationId,
    ) -> Result<Vec<Document>, RepositoryError> {
        let guard = self.records.lock().expect("document mutex poisoned");
        let mut documents: Vec<Document> = guard
            .values()
            .filter(|document| document.application_id == application_id)
            .cloned()
            .collect();
        documents.sort_by_key(|document| document.id.0);
        Ok(documents)
    }

    fn delete_by_application(
        &self,
        application_id: ApplicationId,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("document mutex poisoned");
        guard.retain(|_, document| document.application_id != application_id);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryReviewRepository {
    records: Arc<Mutex<HashMap<ReviewId, Review>>>,
}

impl ReviewRepository for InMemoryReviewRepository {
    fn insert(&self, review: Review) -> Result<Review, RepositoryError> {
        let mut guard = self.records.lock().expect("review mutex poisoned");
        if guard.contains_key(&review.id) {
            return Err(RepositoryError::Conflict);
        }
        if guard
            .values()
            .any(|existing| existing.application_id == review.application_id)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(review.id, review.clone());
        Ok(review)
    }

    fn update(&self, review: Review) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("review mutex poisoned");
        if guard.contains_key(&review.id) {
            guard.insert(review.id, review);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: ReviewId) -> Result<Option<Review>, RepositoryError> {
        let guard = self.records.lock().expect("review mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn find_by_application(
        &self,
        application_id: ApplicationId,
    ) -> Result<Option<Review>, RepositoryError> {
        let guard = self.records.lock().expect("review mutex poisoned");
        Ok(guard
            .values()
            .find(|review| review.application_id == application_id)
            .cloned())
    }

    fn list(&self) -> Result<Vec<Review>, RepositoryError> {
        let guard = self.records.lock().expect("review mutex poisoned");
        let mut reviews: Vec<Review> = guard.values().cloned().collect();
        reviews.sort_by_key(|review| review.id.0);
        Ok(reviews)
    }

    fn list_by_reviewer(&self, reviewer_id: UserId) -> Result<Vec<Review>, RepositoryError> {
        let mut reviews = self.list()?;
        reviews.retain(|review| review.reviewer_id == reviewer_id);
        Ok(reviews)
    }
}
