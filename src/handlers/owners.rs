use actix_web::{HttpResponse, Responder, web};
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedOwner;
use crate::auth::password;
use crate::db::owners as owner_db;
use crate::models::owners::{CreateOwner, NewOwner, OwnerResponse, UpdateOwner};
use crate::models::{Paginated, PaginationQuery};
use crate::validation::{self, ValidationError};

fn validate_registration(body: &CreateOwner) -> Result<(), ValidationError> {
    validation::ensure_not_blank("name", &body.name)?;
    validation::ensure_not_blank("email", &body.email)?;
    validation::ensure_password(&body.password)?;
    validation::ensure_cpf(&body.cpf)
}

fn validate_update(body: &UpdateOwner) -> Result<(), ValidationError> {
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

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn only_self(owner: &AuthenticatedOwner, id: Uuid, action: &str) -> Option<HttpResponse> {
    (owner.id != id).then(|| {
        HttpResponse::Forbidden().json(serde_json::json!({
            "error": format!("You can only {action} your own account"),
        }))
    })
}

/// POST /api/v1/owners — public registration.
pub async fn create_owner(
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateOwner>,
) -> impl Responder {
    let body = body.into_inner();
    if let Err(e) = validate_registration(&body) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }

    let email = body.email.trim().to_lowercase();
    let cpf = validation::normalize_cpf(&body.cpf);

    match owner_db::owner_conflicts(db.get_ref(), Some(&email), Some(&cpf), None).await {
        Ok(true) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "An owner with this email or CPF already exists",
            }));
        }
        Ok(false) => {}
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    let password_hash = match password::hash_password(&body.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("{e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to hash password",
            }));
        }
    };

    let input = NewOwner {
        name: body.name.trim().to_string(),
        email,
        password_hash,
        phone: body.phone,
        cpf,
        birth_date: body.birth_date,
    };

    match owner_db::insert_owner(db.get_ref(), input).await {
        Ok(owner) => {
            tracing::info!(owner_id = %owner.id, "Owner registered");
            HttpResponse::Created().json(OwnerResponse::from(owner))
        }
        Err(e) if is_unique_violation(&e) => HttpResponse::Conflict().json(serde_json::json!({
            "error": "An owner with this email or CPF already exists",
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create owner: {e}"),
        })),
    }
}

/// GET /api/v1/owners — list owners with pagination.
/// Query params: ?page=1&limit=20
pub async fn get_owners(
    _owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> impl Responder {
    match owner_db::get_owners_paginated(db.get_ref(), query.page(), query.limit()).await {
        Ok((owners, total)) => {
            let data: Vec<OwnerResponse> = owners.into_iter().map(OwnerResponse::from).collect();
            HttpResponse::Ok().json(Paginated::new(data, &query, total))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch owners: {e}"),
        })),
    }
}

/// GET /api/v1/owners/{id}
pub async fn get_owner(
    _owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    match owner_db::get_owner_by_id(db.get_ref(), id).await {
        Ok(Some(owner)) => HttpResponse::Ok().json(OwnerResponse::from(owner)),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Owner {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/v1/owners/email/{email}
pub async fn get_owner_by_email(
    _owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> impl Responder {
    let email = path.into_inner().trim().to_lowercase();

    match owner_db::get_owner_by_email(db.get_ref(), &email).await {
        Ok(Some(owner)) => HttpResponse::Ok().json(OwnerResponse::from(owner)),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Owner with email {email} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/v1/owners/{id} — partial profile update, own account only.
pub async fn update_owner(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateOwner>,
) -> impl Responder {
    let id = path.into_inner();
    if let Some(forbidden) = only_self(&owner, id, "update") {
        return forbidden;
    }

    let mut input = body.into_inner();
    if let Err(e) = validate_update(&input) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }
    input.email = input.email.map(|e| e.trim().to_lowercase());
    input.cpf = input.cpf.as_deref().map(validation::normalize_cpf);

    match owner_db::owner_conflicts(
        db.get_ref(),
        input.email.as_deref(),
        input.cpf.as_deref(),
        Some(id),
    )
    .await
    {
        Ok(true) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "Another owner already uses this email or CPF",
            }));
        }
        Ok(false) => {}
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match owner_db::update_owner(db.get_ref(), id, input).await {
        Ok(updated) => HttpResponse::Ok().json(OwnerResponse::from(updated)),
        Err(DbErr::RecordNotFound(_)) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Owner {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update owner: {e}"),
        })),
    }
}

/// DELETE /api/v1/owners/{id} — own account only, refused while any active
/// contract references the owner's properties or tenants.
pub async fn delete_owner(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    if let Some(forbidden) = only_self(&owner, id, "delete") {
        return forbidden;
    }

    match owner_db::count_active_contracts(db.get_ref(), id).await {
        Ok(0) => {}
        Ok(n) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("Owner still has {n} active contract(s)"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match owner_db::delete_owner(db.get_ref(), id).await {
        Ok(result) if result.rows_affected > 0 => HttpResponse::Ok().json(serde_json::json!({
            "message": format!("Owner {id} deleted"),
        })),
        Ok(_) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Owner {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete owner: {e}"),
        })),
    }
}
