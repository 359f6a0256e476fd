use actix_web::HttpResponse;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::contracts as contract_db;
use crate::db::payments as payment_db;
use crate::db::properties as property_db;
use crate::db::tenants as tenant_db;
use crate::models::{contracts, payments, properties, tenants};

fn database_error(e: sea_orm::DbErr) -> HttpResponse {
    tracing::error!("Database error: {e}");
    HttpResponse::InternalServerError().json(serde_json::json!({
        "error": format!("Database error: {e}"),
    }))
}

fn not_found(what: &str, id: Uuid) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": format!("{what} {id} not found"),
    }))
}

/// Load a property and make sure `owner_id` owns it.
pub async fn verify_property_owner(
    db: &DatabaseConnection,
    property_id: Uuid,
    owner_id: Uuid,
) -> Result<properties::Model, HttpResponse> {
    let property = property_db::get_property_by_id(db, property_id)
        .await
        .map_err(database_error)?
        .ok_or_else(|| not_found("Property", property_id))?;

    if property.owner_id != owner_id {
        return Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You do not own this property",
        })));
    }

    Ok(property)
}

pub async fn verify_tenant_owner(
    db: &DatabaseConnection,
    tenant_id: Uuid,
    owner_id: Uuid,
) -> Result<tenants::Model, HttpResponse> {
    let tenant = tenant_db::get_tenant_by_id(db, tenant_id)
        .await
        .map_err(database_error)?
        .ok_or_else(|| not_found("Tenant", tenant_id))?;

    if tenant.owner_id != owner_id {
        return Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "This tenant belongs to another owner",
        })));
    }

    Ok(tenant)
}

/// A contract is reachable by the owner of the property it leases.
pub async fn verify_contract_owner(
    db: &DatabaseConnection,
    contract_id: Uuid,
    owner_id: Uuid,
) -> Result<contracts::Model, HttpResponse> {
    let contract = contract_db::get_contract_by_id(db, contract_id)
        .await
        .map_err(database_error)?
        .ok_or_else(|| not_found("Contract", contract_id))?;

    let owns_property = match property_db::get_property_by_id(db, contract.property_id).await {
        Ok(Some(property)) => property.owner_id == owner_id,
        Ok(None) => false,
        Err(e) => return Err(database_error(e)),
    };

    if !owns_property {
        return Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You do not own the property of this contract",
        })));
    }

    Ok(contract)
}

/// Payments inherit ownership from their contract.
pub async fn verify_payment_owner(
    db: &DatabaseConnection,
    payment_id: Uuid,
    owner_id: Uuid,
) -> Result<payments::Model, HttpResponse> {
    let payment = payment_db::get_payment_by_id(db, payment_id)
        .await
        .map_err(database_error)?
        .ok_or_else(|| not_found("Payment", payment_id))?;

    verify_contract_owner(db, payment.contract_id, owner_id).await?;

    Ok(payment)
}
