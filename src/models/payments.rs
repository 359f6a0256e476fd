use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment status stored as a lowercase string in the database.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "overdue")]
    Overdue,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// SeaORM entity for the `payments` table: one rent installment of a contract.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contract_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    pub due_date: Date,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub paid_amount: Option<Decimal>,
    pub paid_date: Option<Date>,
    pub status: PaymentStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

/// Latest due date that is already overdue at `now`.
///
/// A due date stands for the start of that UTC day, so an installment is
/// overdue as soon as its due day has begun.
pub fn overdue_cutoff(now: DateTimeUtc) -> Date {
    let today = now.date_naive();
    if now.time() > chrono::NaiveTime::MIN {
        today
    } else {
        today.pred_opt().unwrap_or(Date::MIN)
    }
}

impl Model {
    /// Pending with a due date strictly before `now`. Evaluated live, never stored.
    pub fn is_overdue(&self, now: DateTimeUtc) -> bool {
        self.status == PaymentStatus::Pending && self.due_date <= overdue_cutoff(now)
    }

    /// Amount actually settled, falling back to the scheduled amount when the
    /// paid amount was never recorded.
    pub fn settled_amount(&self) -> Decimal {
        self.paid_amount.unwrap_or(self.amount)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contracts::Entity",
        from = "Column::ContractId",
        to = "super::contracts::Column::Id"
    )]
    Contract,
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contract.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePayment {
    pub contract_id: Uuid,
    pub amount: Decimal,
    pub due_date: Date,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePayment {
    pub amount: Option<Decimal>,
    pub due_date: Option<Date>,
    pub paid_amount: Option<Decimal>,
    pub paid_date: Option<Date>,
    pub status: Option<PaymentStatus>,
}

/// Body of `POST /api/v1/payments/{id}/pay`.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkAsPaid {
    pub paid_amount: Decimal,
    pub paid_date: Date,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentListQuery {
    pub status: Option<PaymentStatus>,
    pub contract_id: Option<Uuid>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PaymentListQuery {
    pub fn pagination(&self) -> super::PaginationQuery {
        super::PaginationQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PeriodQuery {
    pub start_date: Date,
    pub end_date: Date,
}
