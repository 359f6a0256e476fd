use sea_orm::*;
use uuid::Uuid;

use crate::models::contracts::{self, ContractStatus};
use crate::models::owners::{self, NewOwner, UpdateOwner};
use crate::models::{properties, tenants};

/// Insert a new owner. The password must already be hashed.
pub async fn insert_owner(db: &DatabaseConnection, input: NewOwner) -> Result<owners::Model, DbErr> {
    let now = chrono::Utc::now();
    let new_owner = owners::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        email: Set(input.email),
        password_hash: Set(input.password_hash),
        phone: Set(input.phone),
        cpf: Set(input.cpf),
        birth_date: Set(input.birth_date),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_owner.insert(db).await
}

/// Fetch a page of owners (1-based page) together with the total count.
pub async fn get_owners_paginated(
    db: &DatabaseConnection,
    page: u64,
    limit: u64,
) -> Result<(Vec<owners::Model>, u64), DbErr> {
    let paginator = owners::Entity::find()
        .order_by_asc(owners::Column::CreatedAt)
        .paginate(db, limit);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page.saturating_sub(1)).await?;
    Ok((items, total))
}

pub async fn get_owner_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<owners::Model>, DbErr> {
    owners::Entity::find_by_id(id).one(db).await
}

pub async fn get_owner_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<owners::Model>, DbErr> {
    owners::Entity::find()
        .filter(owners::Column::Email.eq(email))
        .one(db)
        .await
}

/// Whether another owner already uses `email` or `cpf`.
pub async fn owner_conflicts(
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
        any = any.add(owners::Column::Email.eq(email));
    }
    if let Some(cpf) = cpf {
        any = any.add(owners::Column::Cpf.eq(cpf));
    }

    let mut query = owners::Entity::find().filter(any);
    if let Some(id) = exclude {
        query = query.filter(owners::Column::Id.ne(id));
    }

    Ok(query.count(db).await? > 0)
}

/// Apply a partial profile update.
pub async fn update_owner(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateOwner,
) -> Result<owners::Model, DbErr> {
    let owner = owners::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Owner not found".to_string()))?;

    let mut active: owners::ActiveModel = owner.into();

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

/// Count active contracts touching any property or tenant of this owner.
pub async fn count_active_contracts(db: &DatabaseConnection, owner_id: Uuid) -> Result<u64, DbErr> {
    let property_ids = properties::Entity::find()
        .select_only()
        .column(properties::Column::Id)
        .filter(properties::Column::OwnerId.eq(owner_id))
        .into_tuple::<Uuid>()
        .all(db)
        .await?;
    let tenant_ids = tenants::Entity::find()
        .select_only()
        .column(tenants::Column::Id)
        .filter(tenants::Column::OwnerId.eq(owner_id))
        .into_tuple::<Uuid>()
        .all(db)
        .await?;

    if property_ids.is_empty() && tenant_ids.is_empty() {
        return Ok(0);
    }

    contracts::Entity::find()
        .filter(contracts::Column::Status.eq(ContractStatus::Active))
        .filter(
            Condition::any()
                .add(contracts::Column::PropertyId.is_in(property_ids))
                .add(contracts::Column::TenantId.is_in(tenant_ids)),
        )
        .count(db)
        .await
}

pub async fn delete_owner(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    owners::Entity::delete_by_id(id).exec(db).await
}
