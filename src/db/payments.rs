use sea_orm::*;
use uuid::Uuid;

use crate::models::payments::{self, CreatePayment, MarkAsPaid, PaymentStatus, UpdatePayment};
use crate::models::{contracts, properties};

/// Insert a new installment (always starts Pending).
pub async fn insert_payment(
    db: &DatabaseConnection,
    input: CreatePayment,
) -> Result<payments::Model, DbErr> {
    let now = chrono::Utc::now();
    let new_payment = payments::ActiveModel {
        id: Set(Uuid::new_v4()),
        contract_id: Set(input.contract_id),
        amount: Set(input.amount),
        due_date: Set(input.due_date),
        paid_amount: Set(None),
        paid_date: Set(None),
        status: Set(PaymentStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_payment.insert(db).await
}

pub async fn get_payment_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<payments::Model>, DbErr> {
    payments::Entity::find_by_id(id).one(db).await
}

/// Payments reachable from `owner_id` through contract → property.
fn owned_by(owner_id: Uuid) -> Select<payments::Entity> {
    payments::Entity::find()
        .inner_join(contracts::Entity)
        .join(JoinType::InnerJoin, contracts::Relation::Property.def())
        .filter(properties::Column::OwnerId.eq(owner_id))
}

pub async fn get_payments_by_owner_paginated(
    db: &DatabaseConnection,
    owner_id: Uuid,
    status: Option<PaymentStatus>,
    contract_id: Option<Uuid>,
    page: u64,
    limit: u64,
) -> Result<(Vec<payments::Model>, u64), DbErr> {
    let mut query = owned_by(owner_id);
    if let Some(status) = status {
        query = query.filter(payments::Column::Status.eq(status));
    }
    if let Some(contract_id) = contract_id {
        query = query.filter(payments::Column::ContractId.eq(contract_id));
    }

    let paginator = query
        .order_by_desc(payments::Column::DueDate)
        .paginate(db, limit);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page.saturating_sub(1)).await?;
    Ok((items, total))
}

pub async fn get_payments_by_contract_id(
    db: &DatabaseConnection,
    contract_id: Uuid,
) -> Result<Vec<payments::Model>, DbErr> {
    payments::Entity::find()
        .filter(payments::Column::ContractId.eq(contract_id))
        .order_by_asc(payments::Column::DueDate)
        .all(db)
        .await
}

/// Every payment on any of `contract_ids`, in insertion order.
pub async fn get_payments_by_contract_ids(
    db: &DatabaseConnection,
    contract_ids: &[Uuid],
) -> Result<Vec<payments::Model>, DbErr> {
    if contract_ids.is_empty() {
        return Ok(Vec::new());
    }

    payments::Entity::find()
        .filter(payments::Column::ContractId.is_in(contract_ids.iter().copied()))
        .order_by_asc(payments::Column::CreatedAt)
        .all(db)
        .await
}

/// Owner's payments flagged overdue, or still pending with a due date
/// before `now`.
pub async fn get_overdue_payments_by_owner(
    db: &DatabaseConnection,
    owner_id: Uuid,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<Vec<payments::Model>, DbErr> {
    let cutoff = payments::overdue_cutoff(now);
    owned_by(owner_id)
        .filter(
            Condition::any()
                .add(payments::Column::Status.eq(PaymentStatus::Overdue))
                .add(
                    Condition::all()
                        .add(payments::Column::Status.eq(PaymentStatus::Pending))
                        .add(payments::Column::DueDate.lte(cutoff)),
                ),
        )
        .order_by_asc(payments::Column::DueDate)
        .all(db)
        .await
}

/// Owner's payments due within `[start, end]`, both ends inclusive.
pub async fn get_payments_by_period(
    db: &DatabaseConnection,
    owner_id: Uuid,
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
) -> Result<Vec<payments::Model>, DbErr> {
    owned_by(owner_id)
        .filter(payments::Column::DueDate.between(start, end))
        .order_by_asc(payments::Column::DueDate)
        .all(db)
        .await
}

pub async fn update_payment(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdatePayment,
) -> Result<payments::Model, DbErr> {
    let payment = payments::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Payment not found".to_string()))?;

    let mut active: payments::ActiveModel = payment.into();

    if let Some(amount) = input.amount {
        active.amount = Set(amount);
    }
    if let Some(due_date) = input.due_date {
        active.due_date = Set(due_date);
    }
    if let Some(paid_amount) = input.paid_amount {
        active.paid_amount = Set(Some(paid_amount));
    }
    if let Some(paid_date) = input.paid_date {
        active.paid_date = Set(Some(paid_date));
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await
}

/// Settle an installment: paid amount, paid date and status change together
/// in a single UPDATE.
pub async fn mark_payment_as_paid(
    db: &DatabaseConnection,
    id: Uuid,
    input: MarkAsPaid,
) -> Result<payments::Model, DbErr> {
    let payment = payments::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Payment not found".to_string()))?;

    let mut active: payments::ActiveModel = payment.into();
    active.paid_amount = Set(Some(input.paid_amount));
    active.paid_date = Set(Some(input.paid_date));
    active.status = Set(PaymentStatus::Paid);
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await
}

pub async fn delete_payment(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    payments::Entity::delete_by_id(id).exec(db).await
}
