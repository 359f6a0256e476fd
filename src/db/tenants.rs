use sea_orm::*;
use uuid::Uuid;

use crate::models::contracts::{self, ContractStatus};
use crate::models::tenants::{self, CreateTenant, UpdateTenant};

/// Insert a new tenant for `owner_id`.
pub async fn insert_tenant(
    db: &DatabaseConnection,
    input: CreateTenant,
    owner_id: Uuid,
) -> Result<tenants::Model, DbErr> {
    let now = chrono::Utc::now();
    let new_tenant = tenants::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        email: Set(input.email),
        phone: Set(input.phone),
        cpf: Set(input.cpf),
        birth_date: Set(input.birth_date),
        owner_id: Set(owner_id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_tenant.insert(db).await
}

pub async fn get_tenant_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<tenants::Model>, DbErr> {
    tenants::Entity::find_by_id(id).one(db).await
}

/// Fetch every tenant in `ids`, silently dropping ids that do not exist.
pub async fn get_tenants_by_ids(
    db: &DatabaseConnection,
    ids: &[Uuid],
) -> Result<Vec<tenants::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    tenants::Entity::find()
        .filter(tenants::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await
}

pub async fn get_tenants_by_owner(
    db: &DatabaseConnection,
    owner_id: Uuid,
) -> Result<Vec<tenants::Model>, DbErr> {
    tenants::Entity::find()
        .filter(tenants::Column::OwnerId.eq(owner_id))
        .order_by_asc(tenants::Column::Name)
        .all(db)
        .await
}

pub async fn get_tenants_by_owner_paginated(
    db: &DatabaseConnection,
    owner_id: Uuid,
    page: u64,
    limit: u64,
) -> Result<(Vec<tenants::Model>, u64), DbErr> {
    let paginator = tenants::Entity::find()
        .filter(tenants::Column::OwnerId.eq(owner_id))
        .order_by_asc(tenants::Column::Name)
        .paginate(db, limit);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page.saturating_sub(1)).await?;
    Ok((items, total))
}

/// Whether another tenant already uses `email` or `cpf`.
pub async fn tenant_conflicts(
    db: &DatabaseConnection,
    email: Option<&str>,
    cpf: Option<&str>,
    exclude: Option<Uuid>,
) -> Result<bool, DbErr> {
    if email.is_none() && cpf.is_none() {
        return Ok(false);
    }

    let mut any = Condition::any();
    if let Some(email) = email {
        any = any.add(tenants::Column::Email.eq(email));
    }
    if let Some(cpf) = cpf {
        any = any.add(tenants::Column::Cpf.eq(cpf));
    }

    let mut query = tenants::Entity::find().filter(any);
    if let Some(id) = exclude {
        query = query.filter(tenants::Column::Id.ne(id));
    }

    Ok(query.count(db).await? > 0)
}

pub async fn update_tenant(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateTenant,
) -> Result<tenants::Model, DbErr> {
    let tenant = tenants::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Tenant not found".to_string()))?;

    let mut active: tenants::ActiveModel = tenant.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(email) = input.email {
        active.email = Set(email);
    }
    if let Some(phone) = input.phone {
        active.phone = Set(phone);
    }
    if let Some(cpf) = input.cpf {
        active.cpf = Set(cpf);
    }
    if let Some(birth_date) = input.birth_date {
        active.birth_date = Set(Some(birth_date));
    }
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await
}

pub async fn has_active_contract(db: &DatabaseConnection, tenant_id: Uuid) -> Result<bool, DbErr> {
    let count = contracts::Entity::find()
        .filter(contracts::Column::TenantId.eq(tenant_id))
        .filter(contracts::Column::Status.eq(ContractStatus::Active))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn delete_tenant(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    tenants::Entity::delete_by_id(id).exec(db).await
}
