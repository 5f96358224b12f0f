use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub provider: String,
    #[sea_orm(column_name = "provider_id")]
    pub provider_id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    /// "user" | "admin"
    pub role: String,
    /// "active" | "suspended"
    pub status: String,
    #[sea_orm(column_name = "last_login")]
    pub last_login: Option<OffsetDateTime>,
    #[sea_orm(column_name = "last_logout")]
    pub last_logout: Option<OffsetDateTime>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
