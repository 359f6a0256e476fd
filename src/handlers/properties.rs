use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::verify_property_owner;
use crate::auth::middleware::AuthenticatedOwner;
use crate::db::properties as property_db;
use crate::models::Paginated;
use crate::models::properties::{CreateProperty, PropertyListQuery, UpdateProperty};
use crate::validation::{self, ValidationError};

fn validate_create(body: &CreateProperty) -> Result<(), ValidationError> {
    validation::ensure_not_blank("title", &body.title)?;
    validation::ensure_not_blank("address", &body.address)?;
    validation::ensure_not_negative("rent_amount", body.rent_amount)
}

fn validate_update(body: &UpdateProperty) -> Result<(), ValidationError> {
    if let Some(title) = &body.title {
        validation::ensure_not_blank("title", title)?;
    }
    if let Some(rent_amount) = body.rent_amount {
        validation::ensure_not_negative("rent_amount", rent_amount)?;
    }
    Ok(())
}

/// POST /api/v1/properties — add a property to the authenticated owner's portfolio.
pub async fn create_property(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateProperty>,
) -> impl Responder {
    let input = body.into_inner();
    if let Err(e) = validate_create(&input) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }

    match property_db::insert_property(db.get_ref(), input, owner.id).await {
        Ok(property) => HttpResponse::Created().json(property),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create property: {e}"),
        })),
    }
}

/// GET /api/v1/properties — the authenticated owner's properties.
/// Query params: ?status=available&page=1&limit=20
pub async fn get_properties(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PropertyListQuery>,
) -> impl Responder {
    let pagination = query.pagination();

    match property_db::get_properties_by_owner_paginated(
        db.get_ref(),
        owner.id,
        query.status,
        pagination.page(),
        pagination.limit(),
    )
    .await
    {
        Ok((properties, total)) => {
            HttpResponse::Ok().json(Paginated::new(properties, &pagination, total))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch properties: {e}"),
        })),
    }
}

/// GET /api/v1/properties/{id}
pub async fn get_property(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    match verify_property_owner(db.get_ref(), path.into_inner(), owner.id).await {
        Ok(property) => HttpResponse::Ok().json(property),
        Err(resp) => resp,
    }
}

/// PUT /api/v1/properties/{id} — partial update, status transitions included.
pub async fn update_property(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProperty>,
) -> impl Responder {
    let property_id = path.into_inner();
    if let Err(resp) = verify_property_owner(db.get_ref(), property_id, owner.id).await {
        return resp;
    }

    let input = body.into_inner();
    if let Err(e) = validate_update(&input) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }

    match property_db::update_property(db.get_ref(), property_id, input).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update property: {e}"),
        })),
    }
}

/// DELETE /api/v1/properties/{id} — refused while an active contract leases it.
pub async fn delete_property(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let property_id = path.into_inner();
    if let Err(resp) = verify_property_owner(db.get_ref(), property_id, owner.id).await {
        return resp;
    }

    match property_db::has_active_contract(db.get_ref(), property_id).await {
        Ok(false) => {}
        Ok(true) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "Property has an active contract",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match property_db::delete_property(db.get_ref(), property_id).await {
        Ok(result) if result.rows_affected > 0 => HttpResponse::Ok().json(serde_json::json!({
            "message": format!("Property {property_id} deleted"),
        })),
        Ok(_) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Property {property_id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete property: {e}"),
        })),
    }
}

/// GET /api/v1/properties/owner/{owner_id} — owners can only list their own.
pub async fn get_properties_by_owner(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let owner_id = path.into_inner();
    if owner.id != owner_id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only view your own properties",
        }));
    }

    match property_db::get_properties_by_owner(db.get_ref(), owner_id).await {
        Ok(properties) => HttpResponse::Ok().json(properties),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
