use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contract status stored as a lowercase string in the database.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "expired")]
    Expired,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "pending")]
    Pending,
}

/// SeaORM entity for the `contracts` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub monthly_rent: Decimal,
    pub payment_due_day: i32,
    pub status: ContractStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl Model {
    /// Active means status `active` and the end date not reached yet.
    pub fn is_active(&self, today: Date) -> bool {
        self.status == ContractStatus::Active && today < self.end_date
    }

    /// Whether the lease was in force at some point of `[from, until)`.
    ///
    /// The end date is exclusive, matching `is_active`.
    ///
    /// Cancelled and pending contracts never produced rent, so they never count.
    pub fn overlaps(&self, from: Date, until: Date) -> bool {
        matches!(
            self.status,
            ContractStatus::Active | ContractStatus::Expired
        ) && self.start_date < until
            && self.end_date > from
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::properties::Entity",
        from = "Column::PropertyId",
        to = "super::properties::Column::Id"
    )]
    Property,
    #[sea_orm(
        belongs_to = "super::tenants::Entity",
        from = "Column::TenantId",
        to = "super::tenants::Column::Id"
    )]
    Tenant,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::properties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl Related<super::tenants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenant.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContract {
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub monthly_rent: Decimal,
    pub payment_due_day: i32,
    pub status: Option<ContractStatus>,
}

/// Replaces the mutable fields of a contract; omitted fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContract {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub monthly_rent: Option<Decimal>,
    pub payment_due_day: Option<i32>,
    pub status: Option<ContractStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractListQuery {
    pub status: Option<ContractStatus>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl ContractListQuery {
    pub fn pagination(&self) -> super::PaginationQuery {
        super::PaginationQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}
