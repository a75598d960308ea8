//! Domain library for the food truck vendor permitting backend.
//!
//! Each bounded area carries the same file split: `domain` for entities and
//! status enums, `repository` for storage traits plus in-memory
//! implementations, `service` for the workflow logic, and `router` for the
//! axum surface. The runnable HTTP service in `services/api` wires these
//! together.

pub mod admin;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod inspections;
pub mod pagination;
pub mod permits;
pub mod store;
pub mod telemetry;
