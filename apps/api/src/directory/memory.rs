//! In-process directory used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use time::OffsetDateTime;
use uuid::Uuid;

use super::UserDirectory;
use crate::domain::{NewUser, Role, User, UserStatus};
use crate::errors::domain::{ConflictKind, DomainError};

#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn mutate<F>(&self, id: Uuid, f: F) -> Result<User, DomainError>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.write();
        let user = users.get_mut(&id).ok_or_else(DomainError::user_not_found)?;
        f(user);
        user.updated_at = OffsetDateTime::now_utc();
        Ok(user.clone())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_by_provider_id(
        &self,
        provider: &str,
        provider_id: &str,
    ) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.provider == provider && u.provider_id == provider_id)
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write();

        // Check and insert under the same write lock
        let taken = users
            .values()
            .any(|u| u.provider == new_user.provider && u.provider_id == new_user.provider_id);
        if taken {
            return Err(DomainError::conflict(
                ConflictKind::IdentityTaken,
                "Identity already linked to a user",
            ));
        }

        let now = OffsetDateTime::now_utc();
        let user = new_user.into_user(Uuid::new_v4(), now);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_status(&self, id: Uuid, status: UserStatus) -> Result<User, DomainError> {
        self.mutate(id, |u| u.status = status)
    }

    async fn update_role(&self, id: Uuid, role: Role) -> Result<User, DomainError> {
        self.mutate(id, |u| u.role = role)
    }

    async fn update_last_login(&self, id: Uuid, at: OffsetDateTime) -> Result<(), DomainError> {
        self.mutate(id, |u| u.last_login = Some(at)).map(|_| ())
    }

    async fn update_last_logout(&self, id: Uuid, at: OffsetDateTime) -> Result<(), DomainError> {
        self.mutate(id, |u| u.last_logout = Some(at)).map(|_| ())
    }

    async fn count_by_role(&self, role: Role) -> Result<u64, DomainError> {
        Ok(self.users.read().values().filter(|u| u.role == role).count() as u64)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<User> = self.users.read().values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn remove(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.users.write().remove(&id).is_some())
    }
}
