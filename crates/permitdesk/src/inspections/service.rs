use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;

use super::domain::{Inspection, InspectionId, InspectionResult, InspectorStats};
use super::repository::InspectionRepository;
use crate::admin::domain::{UserId, UserRole};
use crate::admin::repository::UserRepository;
use crate::catalog::domain::FoodTruckId;
use crate::catalog::repository::FoodTruckRepository;
use crate::store::{RepositoryError, Sequence};

static INSPECTION_SEQUENCE: Sequence = Sequence::new();

fn next_inspection_id() -> InspectionId {
    InspectionId(INSPECTION_SEQUENCE.next())
}

/// Error raised by the inspection workflow service.
#[derive(Debug, thiserror::Error)]
pub enum InspectionError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("{entity} not found with id {id}")]
    NotFound { entity: &'static str, id: u64 },
    #[error("user with id {0} is not an inspector")]
    NotAnInspector(UserId),
    #[error("{0}")]
    Validation(String),
}

impl IntoResponse for InspectionError {
    fn into_response(self) -> Response {
        let status = match &self {
            InspectionError::NotFound { .. }
            | InspectionError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            InspectionError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            InspectionError::NotAnInspector(_) | InspectionError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            InspectionError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Inspector assignment and outcome recording, independent of the permit
/// review workflow.
pub struct InspectionService {
    inspections: Arc<dyn InspectionRepository>,
    trucks: Arc<dyn FoodTruckRepository>,
    users: Arc<dyn UserRepository>,
}

impl InspectionService {
    pub fn new(
        inspections: Arc<dyn InspectionRepository>,
        trucks: Arc<dyn FoodTruckRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            inspections,
            trucks,
            users,
        }
    }

    /// Open an IN_PROGRESS inspection for a truck. The user must carry the
    /// INSPECTOR role; a truck may accumulate any number of inspections.
    pub fn assign_inspector(
        &self,
        food_truck_id: FoodTruckId,
        inspector_id: UserId,
    ) -> Result<Inspection, InspectionError> {
        let truck = self
            .trucks
            .fetch(food_truck_id)?
            .ok_or(InspectionError::NotFound { entity: "food truck", id: food_truck_id.0 })?;
        let inspector = self
            .users
            .fetch(inspector_id)?
            .ok_or(InspectionError::NotFound { entity: "user", id: inspector_id.0 })?;

        if inspector.role != UserRole::Inspector {
            return Err(InspectionError::NotAnInspector(inspector_id));
        }

        let inspection = Inspection {
            id: next_inspection_id(),
            food_truck_id: truck.id,
            inspector_id,
            inspection_date: Utc::now(),
            result: InspectionResult::InProgress,
        };
        let inspection = self.inspections.insert(inspection)?;

        tracing::info!(
            inspection_id = inspection.id.0,
            food_truck_id = food_truck_id.0,
            inspector_id = inspector_id.0,
            "inspector assigned"
        );
        Ok(inspection)
    }

    /// Record an inspection outcome. `notes` is accepted for API
    /// compatibility but the schema has no column for it, so it is only
    /// logged.
    pub fn update_inspection(
        &self,
        inspection_id: InspectionId,
        result: InspectionResult,
        notes: Option<String>,
    ) -> Result<Inspection, InspectionError> {
        let mut inspection = self.inspection(inspection_id)?;
        inspection.result = result;
        inspection.inspection_date = Utc::now();
        self.inspections.update(inspection.clone())?;

        if let Some(notes) = notes {
            tracing::debug!(inspection_id = inspection.id.0, %notes, "inspection notes discarded");
        }
        Ok(inspection)
    }

    pub fn inspection(&self, id: InspectionId) -> Result<Inspection, InspectionError> {
        self.inspections
            .fetch(id)?
            .ok_or(InspectionError::NotFound { entity: "inspection", id: id.0 })
    }

    pub fn inspections(&self) -> Result<Vec<Inspection>, InspectionError> {
        Ok(self.inspections.list()?)
    }

    pub fn by_inspector(&self, inspector_id: UserId) -> Result<Vec<Inspection>, InspectionError> {
        Ok(self.inspections.list_by_inspector(inspector_id)?)
    }

    pub fn by_result(&self, result: InspectionResult) -> Result<Vec<Inspection>, InspectionError> {
        Ok(self.inspections.list_by_result(result)?)
    }

    pub fn pending_for_inspector(
        &self,
        inspector_id: UserId,
    ) -> Result<Vec<Inspection>, InspectionError> {
        let mut inspections = self.by_inspector(inspector_id)?;
        inspections.retain(|inspection| inspection.result == InspectionResult::InProgress);
        Ok(inspections)
    }

    pub fn inspector_stats(&self, inspector_id: UserId) -> Result<InspectorStats, InspectionError> {
        let inspections = self.by_inspector(inspector_id)?;
        let total_inspections = inspections.len();
        let pending_inspections = inspections
            .iter()
            .filter(|inspection| inspection.result == InspectionResult::InProgress)
            .count();
        let passed_inspections = inspections
            .iter()
            .filter(|inspection| inspection.result == InspectionResult::Pass)
            .count();
        let failed_inspections = inspections
            .iter()
            .filter(|inspection| inspection.result == InspectionResult::Fail)
            .count();

        let pass_rate = if total_inspections == 0 {
            0.0
        } else {
            passed_inspections as f64 / total_inspections as f64 * 100.0
        };

        Ok(InspectorStats {
            total_inspections,
            pending_inspections,
            passed_inspections,
            failed_inspections,
            pass_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::domain::{NewUser, UserRole};
    use crate::admin::repository::InMemoryUserRepository;
    use crate::admin::service::UserService;
    use crate::catalog::domain::{NewBrand, NewFoodTruck, NewVendor};
    use crate::catalog::repository::{
        InMemoryBrandRepository, InMemoryFoodTruckRepository, InMemoryMenuItemRepository,
        InMemoryVendorRepository,
    };
    use crate::catalog::service::CatalogService;
    use crate::inspections::repository::InMemoryInspectionRepository;

    struct Fixture {
        catalog: CatalogService,
        users: UserService,
        inspections: InspectionService,
    }

    fn fixture() -> Fixture {
        let user_repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::default());
        let truck_repo: Arc<dyn FoodTruckRepository> =
            Arc::new(InMemoryFoodTruckRepository::default());

        let catalog = CatalogService::new(
            Arc::new(InMemoryVendorRepository::default()),
            Arc::new(InMemoryBrandRepository::default()),
            truck_repo.clone(),
            Arc::new(InMemoryMenuItemRepository::default()),
        );
        let inspections = InspectionService::new(
            Arc::new(InMemoryInspectionRepository::default()),
            truck_repo,
            user_repo.clone(),
        );

        Fixture {
            catalog,
            users: UserService::new(user_repo),
            inspections,
        }
    }

    fn seed_truck(fixture: &Fixture) -> FoodTruckId {
        let vendor = fixture
            .catalog
            .register_vendor(NewVendor {
                name: "Inspectable Eats".to_string(),
                email: format!("inspect-{}@permits.example", rand_suffix()),
                password: "pw".to_string(),
                address: None,
            })
            .expect("vendor registers");
        let brand = fixture
            .catalog
            .create_brand(
                vendor.id,
                NewBrand { name: format!("Inspect Brand {}", rand_suffix()) },
            )
            .expect("brand created");
        fixture
            .catalog
            .create_food_truck(
                brand.id,
                NewFoodTruck {
                    operating_region: "Chennai".to_string(),
                    location: None,
                    phone_number: None,
                    cuisine_specialties: None,
                    menu_highlights: None,
                },
            )
            .expect("truck created")
            .id
    }

    fn rand_suffix() -> u64 {
        static SUFFIX: Sequence = Sequence::new();
        SUFFIX.next()
    }

    fn seed_user(fixture: &Fixture, role: UserRole) -> UserId {
        fixture
            .users
            .register(NewUser {
                name: "Inspector Case".to_string(),
                email: format!("user-{}@permits.example", rand_suffix()),
                password: "pw".to_string(),
                role,
            })
            .expect("user registers")
            .id
    }

    #[test]
    fn assignment_requires_the_inspector_role() {
        let fixture = fixture();
        let truck = seed_truck(&fixture);
        let reviewer = seed_user(&fixture, UserRole::Reviewer);

        let err = fixture
            .inspections
            .assign_inspector(truck, reviewer)
            .expect_err("reviewer must be refused");
        assert!(matches!(err, InspectionError::NotAnInspector(_)));
        assert!(fixture
            .inspections
            .inspections()
            .expect("listing")
            .is_empty());
    }

    #[test]
    fn assignment_opens_an_in_progress_inspection() {
        let fixture = fixture();
        let truck = seed_truck(&fixture);
        let inspector = seed_user(&fixture, UserRole::Inspector);

        let inspection = fixture
            .inspections
            .assign_inspector(truck, inspector)
            .expect("assignment succeeds");
        assert_eq!(inspection.result, InspectionResult::InProgress);
        assert_eq!(inspection.food_truck_id, truck);

        // A second inspection on the same truck is allowed.
        fixture
            .inspections
            .assign_inspector(truck, inspector)
            .expect("second assignment succeeds");
    }

    #[test]
    fn outcome_update_sets_result_and_ignores_notes() {
        let fixture = fixture();
        let truck = seed_truck(&fixture);
        let inspector = seed_user(&fixture, UserRole::Inspector);
        let inspection = fixture
            .inspections
            .assign_inspector(truck, inspector)
            .expect("assignment succeeds");

        let updated = fixture
            .inspections
            .update_inspection(
                inspection.id,
                InspectionResult::Pass,
                Some("clean equipment".to_string()),
            )
            .expect("update succeeds");
        assert_eq!(updated.result, InspectionResult::Pass);

        let stats = fixture
            .inspections
            .inspector_stats(inspector)
            .expect("stats compute");
        assert_eq!(stats.total_inspections, 1);
        assert_eq!(stats.passed_inspections, 1);
        assert!((stats.pass_rate - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pending_listing_only_returns_in_progress() {
        let fixture = fixture();
        let truck = seed_truck(&fixture);
        let inspector = seed_user(&fixture, UserRole::Inspector);

        let first = fixture
            .inspections
            .assign_inspector(truck, inspector)
            .expect("first assignment");
        fixture
            .inspections
            .assign_inspector(truck, inspector)
            .expect("second assignment");
        fixture
            .inspections
            .update_inspection(first.id, InspectionResult::Fail, None)
            .expect("first resolved");

        let pending = fixture
            .inspections
            .pending_for_inspector(inspector)
            .expect("pending listing");
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].result, InspectionResult::InProgress);
    }
}
