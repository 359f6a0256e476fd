use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::{verify_contract_owner, verify_property_owner, verify_tenant_owner};
use crate::auth::middleware::AuthenticatedOwner;
use crate::db::contracts as contract_db;
use crate::models::Paginated;
use crate::models::contracts::{
    ContractListQuery, ContractStatus, CreateContract, Model, UpdateContract,
};
use crate::validation::{self, ValidationError};

fn validate_create(body: &CreateContract) -> Result<(), ValidationError> {
    validation::ensure_date_range(body.start_date, body.end_date)?;
    validation::ensure_payment_due_day(body.payment_due_day)?;
    validation::ensure_positive("monthly_rent", body.monthly_rent)
}

/// Checks the update against the contract it will be applied to, so a lone
/// `end_date` is still compared with the stored `start_date`.
fn validate_update(current: &Model, body: &UpdateContract) -> Result<(), ValidationError> {
    validation::ensure_date_range(
        body.start_date.unwrap_or(current.start_date),
        body.end_date.unwrap_or(current.end_date),
    )?;
    if let Some(day) = body.payment_due_day {
        validation::ensure_payment_due_day(day)?;
    }
    if let Some(rent) = body.monthly_rent {
        validation::ensure_positive("monthly_rent", rent)?;
    }
    Ok(())
}

/// 409 when `property_id` already has an active contract other than `except`.
async fn ensure_no_other_active(
    db: &DatabaseConnection,
    property_id: Uuid,
    except: Option<Uuid>,
) -> Result<(), HttpResponse> {
    match contract_db::get_active_contract_by_property(db, property_id).await {
        Ok(Some(active)) if Some(active.id) != except => {
            Err(HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("Property {property_id} already has an active contract"),
            })))
        }
        Ok(_) => Ok(()),
        Err(e) => Err(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        }))),
    }
}

/// POST /api/v1/contracts — lease one of the caller's properties to one of
/// the caller's tenants.
pub async fn create_contract(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateContract>,
) -> impl Responder {
    let input = body.into_inner();
    if let Err(e) = validate_create(&input) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }

    if let Err(resp) = verify_property_owner(db.get_ref(), input.property_id, owner.id).await {
        return resp;
    }
    if let Err(resp) = verify_tenant_owner(db.get_ref(), input.tenant_id, owner.id).await {
        return resp;
    }

    let status = input.status.unwrap_or(ContractStatus::Active);
    if status == ContractStatus::Active {
        if let Err(resp) = ensure_no_other_active(db.get_ref(), input.property_id, None).await {
            return resp;
        }
    }

    match contract_db::insert_contract(db.get_ref(), input).await {
        Ok(contract) => {
            tracing::info!(contract_id = %contract.id, property_id = %contract.property_id, "Contract created");
            HttpResponse::Created().json(contract)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create contract: {e}"),
        })),
    }
}

/// GET /api/v1/contracts — contracts on the caller's properties.
/// Query params: ?status=active&page=1&limit=20
pub async fn get_contracts(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ContractListQuery>,
) -> impl Responder {
    let pagination = query.pagination();

    match contract_db::get_contracts_by_owner_paginated(
        db.get_ref(),
        owner.id,
        query.status,
        pagination.page(),
        pagination.limit(),
    )
    .await
    {
        Ok((contracts, total)) => {
            HttpResponse::Ok().json(Paginated::new(contracts, &pagination, total))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch contracts: {e}"),
        })),
    }
}

/// GET /api/v1/contracts/{id}
pub async fn get_contract(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    match verify_contract_owner(db.get_ref(), path.into_inner(), owner.id).await {
        Ok(contract) => HttpResponse::Ok().json(contract),
        Err(resp) => resp,
    }
}

/// PUT /api/v1/contracts/{id} — replace dates, rent, due day or status.
pub async fn update_contract(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateContract>,
) -> impl Responder {
    let contract_id = path.into_inner();
    let contract = match verify_contract_owner(db.get_ref(), contract_id, owner.id).await {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let input = body.into_inner();
    if let Err(e) = validate_update(&contract, &input) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }

    if input.status == Some(ContractStatus::Active) && contract.status != ContractStatus::Active {
        if let Err(resp) =
            ensure_no_other_active(db.get_ref(), contract.property_id, Some(contract_id)).await
        {
            return resp;
        }
    }

    match contract_db::update_contract(db.get_ref(), contract_id, input).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update contract: {e}"),
        })),
    }
}

/// PUT /api/v1/contracts/{id}/cancel
pub async fn cancel_contract(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let contract_id = path.into_inner();
    let contract = match verify_contract_owner(db.get_ref(), contract_id, owner.id).await {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    if contract.status == ContractStatus::Cancelled {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Contract is already cancelled",
        }));
    }

    match contract_db::update_contract_status(db.get_ref(), contract_id, ContractStatus::Cancelled)
        .await
    {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to cancel contract: {e}"),
        })),
    }
}

/// DELETE /api/v1/contracts/{id}
pub async fn delete_contract(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let contract_id = path.into_inner();
    if let Err(resp) = verify_contract_owner(db.get_ref(), contract_id, owner.id).await {
        return resp;
    }

    match contract_db::delete_contract(db.get_ref(), contract_id).await {
        Ok(result) if result.rows_affected > 0 => HttpResponse::Ok().json(serde_json::json!({
            "message": format!("Contract {contract_id} deleted"),
        })),
        Ok(_) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Contract {contract_id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete contract: {e}"),
        })),
    }
}

/// GET /api/v1/contracts/property/{property_id}
pub async fn get_contracts_by_property(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let property_id = path.into_inner();
    if let Err(resp) = verify_property_owner(db.get_ref(), property_id, owner.id).await {
        return resp;
    }

    match contract_db::get_contracts_by_property_id(db.get_ref(), property_id).await {
        Ok(contracts) => HttpResponse::Ok().json(contracts),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/v1/contracts/property/{property_id}/active
pub async fn get_active_contract_by_property(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let property_id = path.into_inner();
    if let Err(resp) = verify_property_owner(db.get_ref(), property_id, owner.id).await {
        return resp;
    }

    match contract_db::get_active_contract_by_property(db.get_ref(), property_id).await {
        Ok(Some(contract)) => HttpResponse::Ok().json(contract),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Property {property_id} has no active contract"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/v1/contracts/tenant/{tenant_id}
pub async fn get_contracts_by_tenant(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let tenant_id = path.into_inner();
    if let Err(resp) = verify_tenant_owner(db.get_ref(), tenant_id, owner.id).await {
        return resp;
    }

    match contract_db::get_contracts_by_tenant_id(db.get_ref(), tenant_id).await {
        Ok(contracts) => HttpResponse::Ok().json(contracts),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
