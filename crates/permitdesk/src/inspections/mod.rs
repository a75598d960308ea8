//! Physical inspection assignments and outcomes. Inspections track food
//! trucks directly and run independently of the permit review workflow.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Inspection, InspectionId, InspectionResult, InspectorStats};
pub use repository::{InMemoryInspectionRepository, InspectionRepository};
pub use router::inspections_router;
pub use service::{InspectionError, InspectionService};
