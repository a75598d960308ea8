use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;

use super::domain::{
    AdminRequest, AdminRequestId, NewUser, RequestStatus, User, UserId, UserRole, UserUpdate,
};
use super::repository::{AdminRequestRepository, UserRepository};
use crate::store::{RepositoryError, Sequence};

static USER_SEQUENCE: Sequence = Sequence::new();
static REQUEST_SEQUENCE: Sequence = Sequence::new();

fn next_user_id() -> UserId {
    UserId(USER_SEQUENCE.next())
}

fn next_request_id() -> AdminRequestId {
    AdminRequestId(REQUEST_SEQUENCE.next())
}

/// Error raised by the user and admin-request services.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("{entity} not found with id {id}")]
    NotFound { entity: &'static str, id: u64 },
    #[error("a user with this email already exists")]
    DuplicateEmail,
    #[error("an admin request with this email already exists")]
    DuplicateRequest,
    #[error("request has already been processed")]
    AlreadyProcessed,
    #[error("{0}")]
    Validation(String),
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = match &self {
            AdminError::NotFound { .. } | AdminError::Repository(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            AdminError::DuplicateEmail
            | AdminError::DuplicateRequest
            | AdminError::AlreadyProcessed
            | AdminError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            AdminError::Validation(_) => StatusCode::BAD_REQUEST,
            AdminError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Registration, profile updates, and role lookups for staff accounts.
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub fn register(&self, new_user: NewUser) -> Result<User, AdminError> {
        if new_user.email.trim().is_empty() {
            return Err(AdminError::Validation("email is required".to_string()));
        }
        if new_user.password.trim().is_empty() {
            return Err(AdminError::Validation("password is required".to_string()));
        }
        if self.users.find_by_email(&new_user.email)?.is_some() {
            return Err(AdminError::DuplicateEmail);
        }

        let user = User {
            id: next_user_id(),
            name: new_user.name,
            email: new_user.email,
            password: new_user.password,
            role: new_user.role,
        };
        Ok(self.users.insert(user)?)
    }

    /// Account creation on behalf of the management console. Provisioning
    /// further SUPER_ADMIN accounts this way is refused.
    pub fn create_managed(&self, new_user: NewUser) -> Result<User, AdminError> {
        if new_user.role == UserRole::SuperAdmin {
            return Err(AdminError::Validation(
                "cannot create SUPER_ADMIN accounts".to_string(),
            ));
        }
        self.register(new_user)
    }

    pub fn get(&self, id: UserId) -> Result<User, AdminError> {
        self.users
            .fetch(id)?
            .ok_or(AdminError::NotFound { entity: "user", id: id.0 })
    }

    pub fn list(&self) -> Result<Vec<User>, AdminError> {
        Ok(self.users.list()?)
    }

    /// Accounts shown in the management console; SUPER_ADMIN stays hidden.
    pub fn managed_users(&self) -> Result<Vec<User>, AdminError> {
        let mut users = self.users.list()?;
        users.retain(|user| user.role != UserRole::SuperAdmin);
        Ok(users)
    }

    pub fn by_role(&self, role: UserRole) -> Result<Vec<User>, AdminError> {
        Ok(self.users.list_by_role(role)?)
    }

    pub fn update_profile(&self, id: UserId, update: UserUpdate) -> Result<User, AdminError> {
        let mut user = self.get(id)?;

        if let Some(name) = update.name {
            if !name.trim().is_empty() {
                user.name = name;
            }
        }
        if let Some(email) = update.email {
            if !email.trim().is_empty() {
                if let Some(existing) = self.users.find_by_email(&email)? {
                    if existing.id != id {
                        return Err(AdminError::DuplicateEmail);
                    }
                }
                user.email = email;
            }
        }
        if let Some(password) = update.password {
            if !password.trim().is_empty() {
                user.password = password;
            }
        }
        if let Some(role) = update.role {
            user.role = role;
        }

        self.users.update(user.clone())?;
        Ok(user)
    }

    pub fn delete(&self, id: UserId) -> Result<(), AdminError> {
        self.users
            .delete(id)
            .map_err(|_| AdminError::NotFound { entity: "user", id: id.0 })
    }
}

/// Admin self-registration queue gated by super-admin approval.
pub struct AdminRequestService {
    requests: Arc<dyn AdminRequestRepository>,
    users: Arc<dyn UserRepository>,
}

impl AdminRequestService {
    pub fn new(requests: Arc<dyn AdminRequestRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { requests, users }
    }

    pub fn create(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<AdminRequest, AdminError> {
        if self.users.find_by_email(&email)?.is_some() {
            return Err(AdminError::DuplicateEmail);
        }
        if self.requests.find_by_email(&email)?.is_some() {
            return Err(AdminError::DuplicateRequest);
        }

        let request = AdminRequest {
            id: next_request_id(),
            name,
            email,
            password,
            status: RequestStatus::Pending,
            rejection_reason: None,
            reviewed_by: None,
            review_date: None,
        };
        Ok(self.requests.insert(request)?)
    }

    pub fn all(&self) -> Result<Vec<AdminRequest>, AdminError> {
        Ok(self.requests.list()?)
    }

    pub fn pending(&self) -> Result<Vec<AdminRequest>, AdminError> {
        Ok(self.requests.list_by_status(RequestStatus::Pending)?)
    }

    /// Provision an ADMIN account from the stored credentials and mark the
    /// request approved.
    pub fn approve(
        &self,
        request_id: AdminRequestId,
        super_admin_id: UserId,
    ) -> Result<AdminRequest, AdminError> {
        let mut request = self.pending_request(request_id)?;
        let reviewer = self.reviewer(super_admin_id)?;

        let admin = User {
            id: next_user_id(),
            name: request.name.clone(),
            email: request.email.clone(),
            password: request.password.clone(),
            role: UserRole::Admin,
        };
        self.users.insert(admin)?;

        request.status = RequestStatus::Approved;
        request.reviewed_by = Some(reviewer.id);
        request.review_date = Some(Utc::now());
        self.requests.update(request.clone())?;

        tracing::info!(request_id = request.id.0, "admin request approved");
        Ok(request)
    }

    pub fn reject(
        &self,
        request_id: AdminRequestId,
        super_admin_id: UserId,
        reason: String,
    ) -> Result<AdminRequest, AdminError> {
        let mut request = self.pending_request(request_id)?;
        let reviewer = self.reviewer(super_admin_id)?;

        request.status = RequestStatus::Rejected;
        request.rejection_reason = Some(reason);
        request.reviewed_by = Some(reviewer.id);
        request.review_date = Some(Utc::now());
        self.requests.update(request.clone())?;

        Ok(request)
    }

    fn pending_request(&self, id: AdminRequestId) -> Result<AdminRequest, AdminError> {
        let request = self
            .requests
            .fetch(id)?
            .ok_or(AdminError::NotFound { entity: "admin request", id: id.0 })?;
        if request.status != RequestStatus::Pending {
            return Err(AdminError::AlreadyProcessed);
        }
        Ok(request)
    }

    fn reviewer(&self, id: UserId) -> Result<User, AdminError> {
        self.users
            .fetch(id)?
            .ok_or(AdminError::NotFound { entity: "super admin", id: id.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::repository::{InMemoryAdminRequestRepository, InMemoryUserRepository};

    fn services() -> (UserService, AdminRequestService) {
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::default());
        let requests: Arc<dyn AdminRequestRepository> =
            Arc::new(InMemoryAdminRequestRepository::default());
        (
            UserService::new(users.clone()),
            AdminRequestService::new(requests, users),
        )
    }

    fn new_user(email: &str, role: UserRole) -> NewUser {
        NewUser {
            name: "Staff Member".to_string(),
            email: email.to_string(),
            password: "s3cret".to_string(),
            role,
        }
    }

    #[test]
    fn duplicate_email_registration_is_a_conflict() {
        let (users, _) = services();
        users
            .register(new_user("rev@permits.example", UserRole::Reviewer))
            .expect("first registration succeeds");

        let err = users
            .register(new_user("REV@permits.example", UserRole::Admin))
            .expect_err("second registration must fail");
        assert!(matches!(err, AdminError::DuplicateEmail));
    }

    #[test]
    fn managed_creation_refuses_super_admin() {
        let (users, _) = services();
        let err = users
            .create_managed(new_user("root@permits.example", UserRole::SuperAdmin))
            .expect_err("super admin creation must be refused");
        assert!(matches!(err, AdminError::Validation(_)));
    }

    #[test]
    fn approval_provisions_an_admin_account() {
        let (users, requests) = services();
        let super_admin = users
            .register(new_user("root@permits.example", UserRole::SuperAdmin))
            .expect("super admin registered");

        let request = requests
            .create(
                "Applicant".to_string(),
                "new-admin@permits.example".to_string(),
                "hunter2".to_string(),
            )
            .expect("request created");

        let approved = requests
            .approve(request.id, super_admin.id)
            .expect("approval succeeds");
        assert_eq!(approved.status, RequestStatus::Approved);
        assert_eq!(approved.reviewed_by, Some(super_admin.id));

        let provisioned = users
            .by_role(UserRole::Admin)
            .expect("role listing")
            .into_iter()
            .find(|user| user.email == "new-admin@permits.example")
            .expect("admin account exists");
        assert_eq!(provisioned.password, "hunter2");

        let err = requests
            .approve(request.id, super_admin.id)
            .expect_err("re-approval must fail");
        assert!(matches!(err, AdminError::AlreadyProcessed));
    }

    #[test]
    fn rejection_records_the_reason_and_creates_no_user() {
        let (users, requests) = services();
        let super_admin = users
            .register(new_user("root2@permits.example", UserRole::SuperAdmin))
            .expect("super admin registered");

        let request = requests
            .create(
                "Applicant".to_string(),
                "denied@permits.example".to_string(),
                "hunter2".to_string(),
            )
            .expect("request created");

        let rejected = requests
            .reject(request.id, super_admin.id, "incomplete details".to_string())
            .expect("rejection succeeds");
        assert_eq!(rejected.status, RequestStatus::Rejected);
        assert_eq!(rejected.rejection_reason.as_deref(), Some("incomplete details"));

        let admins = users.by_role(UserRole::Admin).expect("role listing");
        assert!(admins.iter().all(|user| user.email != "denied@permits.example"));
    }

    #[test]
    fn request_for_existing_user_email_is_a_conflict() {
        let (users, requests) = services();
        users
            .register(new_user("taken@permits.example", UserRole::Admin))
            .expect("user registered");

        let err = requests
            .create(
                "Applicant".to_string(),
                "taken@permits.example".to_string(),
                "pw".to_string(),
            )
            .expect_err("request must be refused");
        assert!(matches!(err, AdminError::DuplicateEmail));
    }
}
