//! User Directory: the external store of user records.
//!
//! Everything in the session subsystem talks to user storage through
//! [`UserDirectory`]. Two adapters ship with the crate: an in-memory map
//! (development without a database, and tests) and a SeaORM-backed one.

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{NewUser, Role, User, UserStatus};
use crate::errors::domain::DomainError;

pub mod memory;
pub mod sea;

pub use memory::InMemoryUserDirectory;
pub use sea::SeaUserDirectory;

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    async fn find_by_provider_id(
        &self,
        provider: &str,
        provider_id: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Fails with `Conflict(IdentityTaken)` when `(provider, provider_id)` is bound.
    async fn create(&self, new_user: NewUser) -> Result<User, DomainError>;

    async fn update_status(&self, id: Uuid, status: UserStatus) -> Result<User, DomainError>;

    async fn update_role(&self, id: Uuid, role: Role) -> Result<User, DomainError>;

    async fn update_last_login(&self, id: Uuid, at: OffsetDateTime) -> Result<(), DomainError>;

    async fn update_last_logout(&self, id: Uuid, at: OffsetDateTime) -> Result<(), DomainError>;

    async fn count_by_role(&self, role: Role) -> Result<u64, DomainError>;

    /// All users, oldest first.
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Returns false when no such user existed.
    async fn remove(&self, id: Uuid) -> Result<bool, DomainError>;
}
