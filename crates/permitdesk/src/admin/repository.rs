use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{AdminRequest, AdminRequestId, RequestStatus, User, UserId, UserRole};
use crate::store::RepositoryError;

/// Storage abstraction for staff accounts.
pub trait UserRepository: Send + Sync {
    fn insert(&self, user: User) -> Result<User, RepositoryError>;
    fn update(&self, user: User) -> Result<(), RepositoryError>;
    fn fetch(&self, id: UserId) -> Result<Option<User>, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    fn list(&self) -> Result<Vec<User>, RepositoryError>;
    fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, RepositoryError>;
    fn delete(&self, id: UserId) -> Result<(), RepositoryError>;
}

/// Storage abstraction for admin self-registration requests.
pub trait AdminRequestRepository: Send + Sync {
    fn insert(&self, request: AdminRequest) -> Result<AdminRequest, RepositoryError>;
    fn update(&self, request: AdminRequest) -> Result<(), RepositoryError>;
    fn fetch(&self, id: AdminRequestId) -> Result<Option<AdminRequest>, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<AdminRequest>, RepositoryError>;
    fn list(&self) -> Result<Vec<AdminRequest>, RepositoryError>;
    fn list_by_status(&self, status: RequestStatus) -> Result<Vec<AdminRequest>, RepositoryError>;
}

#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
    records: Arc<Mutex<HashMap<UserId, User>>>,
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, user: User) -> Result<User, RepositoryError> {
        let mut guard = self.records.lock().expect("user mutex poisoned");
        if guard.contains_key(&user.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(user.id, user.clone());
        Ok(user)
    }

    fn update(&self, user: User) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("user mutex poisoned");
        if guard.contains_key(&user.id) {
            guard.insert(user.id, user);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let guard = self.records.lock().expect("user mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let guard = self.records.lock().expect("user mutex poisoned");
        Ok(guard
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let guard = self.records.lock().expect("user mutex poisoned");
        let mut users: Vec<User> = guard.values().cloned().collect();
        users.sort_by_key(|user| user.id.0);
        Ok(users)
    }

    fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, RepositoryError> {
        let mut users = self.list()?;
        users.retain(|user| user.role == role);
        Ok(users)
    }

    fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("user mutex poisoned");
        guard.remove(&id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryAdminRequestRepository {
    records: Arc<Mutex<HashMap<AdminRequestId, AdminRequest>>>,
}

impl AdminRequestRepository for InMemoryAdminRequestRepository {
    fn insert(&self, request: AdminRequest) -> Result<AdminRequest, RepositoryError> {
        let mut guard = self.records.lock().expect("admin request mutex poisoned");
        if guard.contains_key(&request.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(request.id, request.clone());
        Ok(request)
    }

    fn update(&self, request: AdminRequest) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("admin request mutex poisoned");
        if guard.contains_key(&request.id) {
            guard.insert(request.id, request);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: AdminRequestId) -> Result<Option<AdminRequest>, RepositoryError> {
        let guard = self.records.lock().expect("admin request mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<AdminRequest>, RepositoryError> {
        let guard = self.records.lock().expect("admin request mutex poisoned");
        Ok(guard
            .values()
            .find(|request| request.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn list(&self) -> Result<Vec<AdminRequest>, RepositoryError> {
        let guard = self.records.lock().expect("admin request mutex poisoned");
        let mut requests: Vec<AdminRequest> = guard.values().cloned().collect();
        requests.sort_by_key(|request| request.id.0);
        Ok(requests)
    }

    fn list_by_status(&self, status: RequestStatus) -> Result<Vec<AdminRequest>, RepositoryError> {
        let mut requests = self.list()?;
        requests.retain(|request| request.status == status);
        Ok(requests)
    }
}
