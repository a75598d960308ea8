use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use permitdesk::admin::repository::{
    InMemoryAdminRequestRepository, InMemoryUserRepository, UserRepository,
};
use permitdesk::admin::router::AdminState;
use permitdesk::admin::service::{AdminRequestService, UserService};
use permitdesk::catalog::repository::{
    BrandRepository, FoodTruckRepository, InMemoryBrandRepository, InMemoryFoodTruckRepository,
    InMemoryMenuItemRepository, InMemoryVendorRepository, VendorRepository,
};
use permitdesk::catalog::service::CatalogService;
use permitdesk::dashboard::service::DashboardService;
use permitdesk::inspections::repository::{InMemoryInspectionRepository, InspectionRepository};
use permitdesk::inspections::service::InspectionService;
use permitdesk::permits::repository::{
    ApplicationRepository, InMemoryApplicationRepository, InMemoryDocumentRepository,
    InMemoryReviewRepository, ReviewRepository,
};
use permitdesk::permits::service::PermitService;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The fully wired service layer. Every area shares the same in-memory
/// stores so cross-area reads (dashboard, permit detail joins) observe one
/// consistent world.
pub(crate) struct Services {
    pub(crate) catalog: Arc<CatalogService>,
    pub(crate) admin: AdminState,
    pub(crate) permits: Arc<PermitService>,
    pub(crate) inspections: Arc<InspectionService>,
    pub(crate) dashboard: Arc<DashboardService>,
}

pub(crate) fn build_services() -> Services {
    let vendors: Arc<dyn VendorRepository> = Arc::new(InMemoryVendorRepository::default());
    let brands: Arc<dyn BrandRepository> = Arc::new(InMemoryBrandRepository::default());
    let trucks: Arc<dyn FoodTruckRepository> = Arc::new(InMemoryFoodTruckRepository::default());
    let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::default());
    let applications: Arc<dyn ApplicationRepository> =
        Arc::new(InMemoryApplicationRepository::default());
    let reviews: Arc<dyn ReviewRepository> = Arc::new(InMemoryReviewRepository::default());
    let inspections: Arc<dyn InspectionRepository> =
        Arc::new(InMemoryInspectionRepository::default());

    let catalog = Arc::new(CatalogService::new(
        vendors.clone(),
        brands.clone(),
        trucks.clone(),
        Arc::new(InMemoryMenuItemRepository::default()),
    ));
    let user_service = Arc::new(UserService::new(users.clone()));
    let request_service = Arc::new(AdminRequestService::new(
        Arc::new(InMemoryAdminRequestRepository::default()),
        users.clone(),
    ));
    let permits = Arc::new(PermitService::new(
        applications.clone(),
        Arc::new(InMemoryDocumentRepository::default()),
        reviews.clone(),
        trucks.clone(),
        brands,
        vendors.clone(),
        users.clone(),
    ));
    let inspection_service = Arc::new(InspectionService::new(
        inspections.clone(),
        trucks.clone(),
        users.clone(),
    ));
    let dashboard = Arc::new(DashboardService::new(
        users,
        vendors,
        trucks,
        applications,
        reviews,
        inspections,
    ));

    Services {
        catalog,
        admin: AdminState {
            users: user_service,
            requests: request_service,
        },
        permits,
        inspections: inspection_service,
        dashboard,
    }
}
