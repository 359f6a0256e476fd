use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::verify_tenant_owner;
use crate::auth::middleware::AuthenticatedOwner;
use crate::db::tenants as tenant_db;
use crate::models::{Paginated, PaginationQuery};
use crate::models::tenants::{CreateTenant, UpdateTenant};
use crate::validation::{self, ValidationError};

fn validate_create(body: &CreateTenant) -> Result<(), ValidationError> {
    validation::ensure_not_blank("name", &body.name)?;
    validation::ensure_not_blank("email", &body.email)?;
    validation::ensure_cpf(&body.cpf)
}

fn validate_update(body: &UpdateTenant) -> Result<(), ValidationError> {
    if let Some(name) = &body.name {
        validation::ensure_not_blank("name", name)?;
    }
    if let Some(email) = &body.email {
        validation::ensure_not_blank("email", email)?;
    }
    if let Some(cpf) = &body.cpf {
        validation::ensure_cpf(cpf)?;
    }
    Ok(())
}

/// POST /api/v1/tenants — register a tenant under the authenticated owner.
pub async fn create_tenant(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateTenant>,
) -> impl Responder {
    let mut input = body.into_inner();
    if let Err(e) = validate_create(&input) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }
    input.email = input.email.trim().to_lowercase();
    input.cpf = validation::normalize_cpf(&input.cpf);

    match tenant_db::tenant_conflicts(db.get_ref(), Some(&input.email), Some(&input.cpf), None)
        .await
    {
        Ok(true) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "A tenant with this email or CPF already exists",
            }));
        }
        Ok(false) => {}
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match tenant_db::insert_tenant(db.get_ref(), input, owner.id).await {
        Ok(tenant) => HttpResponse::Created().json(tenant),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create tenant: {e}"),
        })),
    }
}

/// GET /api/v1/tenants — the authenticated owner's tenants, paginated.
pub async fn get_tenants(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> impl Responder {
    match tenant_db::get_tenants_by_owner_paginated(
        db.get_ref(),
        owner.id,
        query.page(),
        query.limit(),
    )
    .await
    {
        Ok((tenants, total)) => HttpResponse::Ok().json(Paginated::new(tenants, &query, total)),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch tenants: {e}"),
        })),
    }
}

/// GET /api/v1/tenants/{id}
pub async fn get_tenant(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    match verify_tenant_owner(db.get_ref(), path.into_inner(), owner.id).await {
        Ok(tenant) => HttpResponse::Ok().json(tenant),
        Err(resp) => resp,
    }
}

/// PUT /api/v1/tenants/{id} — partial profile update.
pub async fn update_tenant(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTenant>,
) -> impl Responder {
    let tenant_id = path.into_inner();
    if let Err(resp) = verify_tenant_owner(db.get_ref(), tenant_id, owner.id).await {
        return resp;
    }

    let mut input = body.into_inner();
    if let Err(e) = validate_update(&input) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }
    input.email = input.email.map(|e| e.trim().to_lowercase());
    input.cpf = input.cpf.as_deref().map(validation::normalize_cpf);

    match tenant_db::tenant_conflicts(
        db.get_ref(),
        input.email.as_deref(),
        input.cpf.as_deref(),
        Some(tenant_id),
    )
    .await
    {
        Ok(true) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "Another tenant already uses this email or CPF",
            }));
        }
        Ok(false) => {}
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match tenant_db::update_tenant(db.get_ref(), tenant_id, input).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update tenant: {e}"),
        })),
    }
}

/// DELETE /api/v1/tenants/{id} — refused while an active contract references
/// the tenant.
pub async fn delete_tenant(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let tenant_id = path.into_inner();
    if let Err(resp) = verify_tenant_owner(db.get_ref(), tenant_id, owner.id).await {
        return resp;
    }

    match tenant_db::has_active_contract(db.get_ref(), tenant_id).await {
        Ok(false) => {}
        Ok(true) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "Tenant has an active contract",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match tenant_db::delete_tenant(db.get_ref(), tenant_id).await {
        Ok(result) if result.rows_affected > 0 => HttpResponse::Ok().json(serde_json::json!({
            "message": format!("Tenant {tenant_id} deleted"),
        })),
        Ok(_) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Tenant {tenant_id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete tenant: {e}"),
        })),
    }
}

/// GET /api/v1/tenants/owner/{owner_id} — owners can only list their own.
pub async fn get_tenants_by_owner(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let owner_id = path.into_inner();
    if owner.id != owner_id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only view your own tenants",
        }));
    }

    match tenant_db::get_tenants_by_owner(db.get_ref(), owner_id).await {
        Ok(tenants) => HttpResponse::Ok().json(tenants),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
