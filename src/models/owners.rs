use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `owners` table.
///
/// `password_hash` and `cpf` are skipped on serialization; API responses go
/// through [`OwnerResponse`] anyway.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "owners")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: String,
    #[sea_orm(unique)]
    #[serde(skip_serializing)]
    pub cpf: String,
    pub birth_date: Option<Date>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::properties::Entity")]
    Properties,
    #[sea_orm(has_many = "super::tenants::Entity")]
    Tenants,
}

impl Related<super::properties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Properties.def()
    }
}

impl Related<super::tenants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body of `POST /api/v1/owners` (public registration).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOwner {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub cpf: String,
    pub birth_date: Option<Date>,
}

/// Already-validated insert payload; the password is hashed by then.
#[derive(Debug, Clone)]
pub struct NewOwner {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub cpf: String,
    pub birth_date: Option<Date>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOwner {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub cpf: Option<String>,
    pub birth_date: Option<Date>,
}

/// Owner as exposed over the API (no password hash, no CPF).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: Option<Date>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl From<Model> for OwnerResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            birth_date: m.birth_date,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
