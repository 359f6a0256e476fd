use sea_orm::*;
use uuid::Uuid;

use crate::models::contracts::{self, ContractStatus, CreateContract, UpdateContract};
use crate::models::properties;

/// Insert a new contract (defaults to Active status).
pub async fn insert_contract(
    db: &DatabaseConnection,
    input: CreateContract,
) -> Result<contracts::Model, DbErr> {
    let now = chrono::Utc::now();
    let new_contract = contracts::ActiveModel {
        id: Set(Uuid::new_v4()),
        property_id: Set(input.property_id),
        tenant_id: Set(input.tenant_id),
        start_date: Set(input.start_date),
        end_date: Set(input.end_date),
        monthly_rent: Set(input.monthly_rent),
        payment_due_day: Set(input.payment_due_day),
        status: Set(input.status.unwrap_or(ContractStatus::Active)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_contract.insert(db).await
}

/// Fetch a single contract by ID.
pub async fn get_contract_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<contracts::Model>, DbErr> {
    contracts::Entity::find_by_id(id).one(db).await
}

/// Contracts on any property owned by `owner_id`, optionally by status.
pub async fn get_contracts_by_owner_paginated(
    db: &DatabaseConnection,
    owner_id: Uuid,
    status: Option<ContractStatus>,
    page: u64,
    limit: u64,
) -> Result<(Vec<contracts::Model>, u64), DbErr> {
    let mut query = contracts::Entity::find()
        .inner_join(properties::Entity)
        .filter(properties::Column::OwnerId.eq(owner_id));
    if let Some(status) = status {
        query = query.filter(contracts::Column::Status.eq(status));
    }

    let paginator = query
        .order_by_desc(contracts::Column::StartDate)
        .paginate(db, limit);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page.saturating_sub(1)).await?;
    Ok((items, total))
}

pub async fn get_contracts_by_property_id(
    db: &DatabaseConnection,
    property_id: Uuid,
) -> Result<Vec<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::PropertyId.eq(property_id))
        .order_by_desc(contracts::Column::StartDate)
        .all(db)
        .await
}

/// All contracts, whatever their status, on any of `property_ids`.
pub async fn get_contracts_by_property_ids(
    db: &DatabaseConnection,
    property_ids: &[Uuid],
) -> Result<Vec<contracts::Model>, DbErr> {
    if property_ids.is_empty() {
        return Ok(Vec::new());
    }

    contracts::Entity::find()
        .filter(contracts::Column::PropertyId.is_in(property_ids.iter().copied()))
        .order_by_asc(contracts::Column::StartDate)
        .all(db)
        .await
}

pub async fn get_contracts_by_tenant_id(
    db: &DatabaseConnection,
    tenant_id: Uuid,
) -> Result<Vec<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::TenantId.eq(tenant_id))
        .order_by_desc(contracts::Column::StartDate)
        .all(db)
        .await
}

/// The property's contract with status Active, if any. Only one is expected,
/// but the schema does not enforce it, so the most recent one wins.
pub async fn get_active_contract_by_property(
    db: &DatabaseConnection,
    property_id: Uuid,
) -> Result<Option<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::PropertyId.eq(property_id))
        .filter(contracts::Column::Status.eq(ContractStatus::Active))
        .order_by_desc(contracts::Column::StartDate)
        .one(db)
        .await
}

/// Replace the mutable fields of a contract and bump `updated_at`.
pub async fn update_contract(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateContract,
) -> Result<contracts::Model, DbErr> {
    let contract = contracts::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Contract not found".to_string()))?;

    let mut active: contracts::ActiveModel = contract.into();

    if let Some(start_date) = input.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(end_date) = input.end_date {
        active.end_date = Set(end_date);
    }
    if let Some(monthly_rent) = input.monthly_rent {
        active.monthly_rent = Set(monthly_rent);
    }
    if let Some(payment_due_day) = input.payment_due_day {
        active.payment_due_day = Set(payment_due_day);
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await
}

/// Update the status of a contract.
pub async fn update_contract_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: ContractStatus,
) -> Result<contracts::Model, DbErr> {
    update_contract(
        db,
        id,
        UpdateContract {
            status: Some(status),
            ..Default::default()
        },
    )
    .await
}

/// Delete a contract by ID.
pub async fn delete_contract(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    contracts::Entity::delete_by_id(id).exec(db).await
}
