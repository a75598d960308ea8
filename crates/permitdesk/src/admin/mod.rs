//! User accounts and the self-service admin request queue.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    AdminRequest, AdminRequestId, NewUser, RequestStatus, User, UserId, UserRole, UserUpdate,
};
pub use repository::{
    AdminRequestRepository, InMemoryAdminRequestRepository, InMemoryUserRepository, UserRepository,
};
pub use router::{admin_router, AdminState};
pub use service::{AdminError, AdminRequestService, UserService};
