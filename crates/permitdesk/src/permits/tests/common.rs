use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::admin::domain::{NewUser, UserId, UserRole};
use crate::admin::repository::{InMemoryUserRepository, UserRepository};
use crate::admin::service::UserService;
use crate::catalog::domain::{FoodTruckId, NewBrand, NewFoodTruck, NewVendor, VendorId};
use crate::catalog::repository::{
    BrandRepository, FoodTruckRepository, InMemoryBrandRepository, InMemoryFoodTruckRepository,
    InMemoryMenuItemRepository, InMemoryVendorRepository, VendorRepository,
};
use crate::catalog::service::CatalogService;
use crate::permits::domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationSubmission, NewDocument,
};
use crate::permits::repository::{
    ApplicationRepository, InMemoryApplicationRepository, InMemoryDocumentRepository,
    InMemoryReviewRepository,
};
use crate::permits::service::PermitService;
use crate::store::{RepositoryError, Sequence};

pub(super) struct World {
    pub(super) catalog: CatalogService,
    pub(super) users: UserService,
    pub(super) permits: Arc<PermitService>,
    pub(super) trucks: Arc<dyn FoodTruckRepository>,
}

pub(super) fn build_world() -> World {
    let vendors: Arc<dyn VendorRepository> = Arc::new(InMemoryVendorRepository::default());
    let brands: Arc<dyn BrandRepository> = Arc::new(InMemoryBrandRepository::default());
    let trucks: Arc<dyn FoodTruckRepository> = Arc::new(InMemoryFoodTruckRepository::default());
    let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::default());

    let catalog = CatalogService::new(
        vendors.clone(),
        brands.clone(),
        trucks.clone(),
        Arc::new(InMemoryMenuItemRepository::default()),
    );
    let permits = Arc::new(PermitService::new(
        Arc::new(InMemoryApplicationRepository::default()),
        Arc::new(InMemoryDocumentRepository::default()),
        Arc::new(InMemoryReviewRepository::default()),
        trucks.clone(),
        brands,
        vendors,
        users.clone(),
    ));

    World {
        catalog,
        users: UserService::new(users),
        permits,
        trucks,
    }
}

/// Id sequences are process-wide, so fixtures derive unique emails and brand
/// names from a counter instead of assuming fresh stores.
pub(super) fn unique_suffix() -> u64 {
    static SUFFIX: Sequence = Sequence::new();
    SUFFIX.next()
}

pub(super) fn seed_truck(world: &World) -> (VendorId, FoodTruckId) {
    let suffix = unique_suffix();
    let vendor = world
        .catalog
        .register_vendor(NewVendor {
            name: "Marina Street Foods".to_string(),
            email: format!("vendor-{suffix}@permits.example"),
            password: "changeme".to_string(),
            address: Some("12 Beach Road".to_string()),
        })
        .expect("vendor registers");
    let brand = world
        .catalog
        .create_brand(vendor.id, NewBrand { name: format!("Dosa Express {suffix}") })
        .expect("brand created");
    let truck = world
        .catalog
        .create_food_truck(
            brand.id,
            NewFoodTruck {
                operating_region: "Chennai".to_string(),
                location: Some("Marina Beach".to_string()),
                phone_number: Some("+91-44-555-0101".to_string()),
                cuisine_specialties: Some("South Indian".to_string()),
                menu_highlights: Some("Ghee roast dosa".to_string()),
            },
        )
        .expect("truck created");
    (vendor.id, truck.id)
}

pub(super) fn seed_user(world: &World, role: UserRole) -> UserId {
    world
        .users
        .register(NewUser {
            name: "Workflow User".to_string(),
            email: format!("user-{}@permits.example", unique_suffix()),
            password: "changeme".to_string(),
            role,
        })
        .expect("user registers")
        .id
}

pub(super) fn submission(truck: FoodTruckId, vendor: VendorId) -> ApplicationSubmission {
    ApplicationSubmission {
        food_truck_id: truck,
        vendor_id: vendor,
        documents: vec![NewDocument {
            document_name: "FSSAI licence".to_string(),
            file_path: "/uploads/fssai-licence.pdf".to_string(),
        }],
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Application store that refuses every operation, for exercising the 500
/// path in the handlers.
pub(super) struct UnavailableApplications;

impl ApplicationRepository for UnavailableApplications {
    fn insert(&self, _application: Application) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _application: Application) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_food_truck(
        &self,
        _truck_id: FoodTruckId,
    ) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_by_status(
        &self,
        _status: ApplicationStatus,
    ) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: ApplicationId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
