//! Platform-wide counters for the super admin dashboard.

pub mod router;
pub mod service;

pub use router::dashboard_router;
pub use service::{DashboardError, DashboardService, DashboardStats};
