//! SeaORM adapter for the user directory.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use super::UserDirectory;
use crate::domain::{NewUser, Role, User, UserStatus};
use crate::entities::users;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};

#[derive(Debug, Clone)]
pub struct SeaUserDirectory {
    conn: DatabaseConnection,
}

impl SeaUserDirectory {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn update_with<F>(&self, id: Uuid, f: F) -> Result<users::Model, DomainError>
    where
        F: FnOnce(&mut users::ActiveModel) + Send,
    {
        let model = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(DomainError::user_not_found)?;

        let mut active = model.into_active_model();
        f(&mut active);
        active.updated_at = Set(OffsetDateTime::now_utc());
        Ok(active.update(&self.conn).await?)
    }
}

impl TryFrom<users::Model> for User {
    type Error = DomainError;

    fn try_from(model: users::Model) -> Result<Self, Self::Error> {
        let corrupt = |e: DomainError| {
            DomainError::infra(
                InfraErrorKind::Other("DataCorruption".into()),
                format!("users row {}: {e}", model.id),
            )
        };
        let role = model.role.parse::<Role>().map_err(corrupt)?;
        let status = model.status.parse::<UserStatus>().map_err(corrupt)?;

        Ok(Self {
            id: model.id,
            provider: model.provider,
            provider_id: model.provider_id,
            email: model.email,
            name: model.name,
            picture: model.picture,
            role,
            status,
            last_login: model.last_login,
            last_logout: model.last_logout,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[async_trait]
impl UserDirectory for SeaUserDirectory {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        users::Entity::find_by_id(id)
            .one(&self.conn)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_provider_id(
        &self,
        provider: &str,
        provider_id: &str,
    ) -> Result<Option<User>, DomainError> {
        users::Entity::find()
            .filter(users::Column::Provider.eq(provider))
            .filter(users::Column::ProviderId.eq(provider_id))
            .one(&self.conn)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        if self
            .find_by_provider_id(&new_user.provider, &new_user.provider_id)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(
                ConflictKind::IdentityTaken,
                "Identity already linked to a user",
            ));
        }

        let now = OffsetDateTime::now_utc();
        let active = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            provider: Set(new_user.provider),
            provider_id: Set(new_user.provider_id),
            email: Set(new_user.email),
            name: Set(new_user.name),
            picture: Set(new_user.picture),
            role: Set(new_user.role.as_str().to_string()),
            status: Set(new_user.status.as_str().to_string()),
            last_login: Set(None),
            last_logout: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active.insert(&self.conn).await?;
        debug!(user_id = %model.id, "users row inserted");
        User::try_from(model)
    }

    async fn update_status(&self, id: Uuid, status: UserStatus) -> Result<User, DomainError> {
        let model = self
            .update_with(id, |a| a.status = Set(status.as_str().to_string()))
            .await?;
        User::try_from(model)
    }

    async fn update_role(&self, id: Uuid, role: Role) -> Result<User, DomainError> {
        let model = self
            .update_with(id, |a| a.role = Set(role.as_str().to_string()))
            .await?;
        User::try_from(model)
    }

    async fn update_last_login(&self, id: Uuid, at: OffsetDateTime) -> Result<(), DomainError> {
        self.update_with(id, |a| a.last_login = Set(Some(at))).await?;
        Ok(())
    }

    async fn update_last_logout(&self, id: Uuid, at: OffsetDateTime) -> Result<(), DomainError> {
        self.update_with(id, |a| a.last_logout = Set(Some(at))).await?;
        Ok(())
    }

    async fn count_by_role(&self, role: Role) -> Result<u64, DomainError> {
        Ok(users::Entity::find()
            .filter(users::Column::Role.eq(role.as_str()))
            .count(&self.conn)
            .await?)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn remove(&self, id: Uuid) -> Result<bool, DomainError> {
        let res = users::Entity::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected > 0)
    }
}
