use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{Inspection, InspectionId, InspectionResult};
use crate::admin::domain::UserId;
use crate::store::RepositoryError;

/// Storage abstraction for inspections.
pub trait InspectionRepository: Send + Sync {
    fn insert(&self, inspection: Inspection) -> Result<Inspection, RepositoryError>;
    fn update(&self, inspection: Inspection) -> Result<(), RepositoryError>;
    fn fetch(&self, id: InspectionId) -> Result<Option<Inspection>, RepositoryError>;
    fn list(&self) -> Result<Vec<Inspection>, RepositoryError>;
    fn list_by_inspector(&self, inspector_id: UserId) -> Result<Vec<Inspection>, RepositoryError>;
    fn list_by_result(&self, result: InspectionResult)
        -> Result<Vec<Inspection>, RepositoryError>;
}

#[derive(Default, Clone)]
pub struct InMemoryInspectionRepository {
    records: Arc<Mutex<HashMap<InspectionId, Inspection>>>,
}

impl InspectionRepository for InMemoryInspectionRepository {
    fn insert(&self, inspection: Inspection) -> Result<Inspection, RepositoryError> {
        let mut guard = self.records.lock().expect("inspection mutex poisoned");
        if guard.contains_key(&inspection.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(inspection.id, inspection.clone());
        Ok(inspection)
    }

    fn update(&self, inspection: Inspection) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("inspection mutex poisoned");
        if guard.contains_key(&inspection.id) {
            guard.insert(inspection.id, inspection);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: InspectionId) -> Result<Option<Inspection>, RepositoryError> {
        let guard = self.records.lock().expect("inspection mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<Inspection>, RepositoryError> {
        let guard = self.records.lock().expect("inspection mutex poisoned");
        let mut inspections: Vec<Inspection> = guard.values().cloned().collect();
        inspections.sort_by_key(|inspection| inspection.id.0);
        Ok(inspections)
    }

    fn list_by_inspector(&self, inspector_id: UserId) -> Result<Vec<Inspection>, RepositoryError> {
        let mut inspections = self.list()?;
        inspections.retain(|inspection| inspection.inspector_id == inspector_id);
        Ok(inspections)
    }

    fn list_by_result(
        &self,
        result: InspectionResult,
    ) -> Result<Vec<Inspection>, RepositoryError> {
        let mut inspections = self.list()?;
        inspections.retain(|inspection| inspection.result == result);
        Ok(inspections)
    }
}
