use sea_orm::*;
use uuid::Uuid;

use crate::models::contracts::{self, ContractStatus};
use crate::models::properties::{self, CreateProperty, PropertyStatus, UpdateProperty};

/// Insert a new property for `owner_id` (defaults to Available status).
pub async fn insert_property(
    db: &DatabaseConnection,
    input: CreateProperty,
    owner_id: Uuid,
) -> Result<properties::Model, DbErr> {
    let now = chrono::Utc::now();
    let new_property = properties::ActiveModel {
        id: Set(Uuid::new_v4()),
        owner_id: Set(owner_id),
        title: Set(input.title),
        description: Set(input.description),
        address: Set(input.address),
        city: Set(input.city),
        state: Set(input.state),
        zip_code: Set(input.zip_code),
        bedrooms: Set(input.bedrooms),
        bathrooms: Set(input.bathrooms),
        area: Set(input.area),
        rent_amount: Set(input.rent_amount),
        status: Set(input.status.unwrap_or(PropertyStatus::Available)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_property.insert(db).await
}

pub async fn get_property_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<properties::Model>, DbErr> {
    properties::Entity::find_by_id(id).one(db).await
}

/// Every property of one owner, oldest first. No pagination: callers that
/// aggregate over a portfolio need the complete set.
pub async fn get_properties_by_owner(
    db: &DatabaseConnection,
    owner_id: Uuid,
) -> Result<Vec<properties::Model>, DbErr> {
    properties::Entity::find()
        .filter(properties::Column::OwnerId.eq(owner_id))
        .order_by_asc(properties::Column::CreatedAt)
        .all(db)
        .await
}

pub async fn get_properties_by_owner_paginated(
    db: &DatabaseConnection,
    owner_id: Uuid,
    status: Option<PropertyStatus>,
    page: u64,
    limit: u64,
) -> Result<(Vec<properties::Model>, u64), DbErr> {
    let mut query = properties::Entity::find().filter(properties::Column::OwnerId.eq(owner_id));
    if let Some(status) = status {
        query = query.filter(properties::Column::Status.eq(status));
    }

    let paginator = query
        .order_by_asc(properties::Column::CreatedAt)
        .paginate(db, limit);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page.saturating_sub(1)).await?;
    Ok((items, total))
}

pub async fn update_property(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProperty,
) -> Result<properties::Model, DbErr> {
    let property = properties::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Property not found".to_string()))?;

    let mut active: properties::ActiveModel = property.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(address) = input.address {
        active.address = Set(address);
    }
    if let Some(city) = input.city {
        active.city = Set(city);
    }
    if let Some(state) = input.state {
        active.state = Set(state);
    }
    if let Some(zip_code) = input.zip_code {
        active.zip_code = Set(zip_code);
    }
    if let Some(bedrooms) = input.bedrooms {
        active.bedrooms = Set(bedrooms);
    }
    if let Some(bathrooms) = input.bathrooms {
        active.bathrooms = Set(bathrooms);
    }
    if let Some(area) = input.area {
        active.area = Set(area);
    }
    if let Some(rent_amount) = input.rent_amount {
        active.rent_amount = Set(rent_amount);
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await
}

pub async fn has_active_contract(
    db: &DatabaseConnection,
    property_id: Uuid,
) -> Result<bool, DbErr> {
    let count = contracts::Entity::find()
        .filter(contracts::Column::PropertyId.eq(property_id))
        .filter(contracts::Column::Status.eq(ContractStatus::Active))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn delete_property(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    properties::Entity::delete_by_id(id).exec(db).await
}
