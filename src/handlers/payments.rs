use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::{verify_contract_owner, verify_payment_owner};
use crate::auth::middleware::AuthenticatedOwner;
use crate::db::payments as payment_db;
use crate::models::Paginated;
use crate::models::payments::{
    CreatePayment, MarkAsPaid, PaymentListQuery, PaymentStatus, PeriodQuery, UpdatePayment,
};
use crate::validation::{self, ValidationError};

fn validate_update(body: &UpdatePayment) -> Result<(), ValidationError> {
    if let Some(amount) = body.amount {
        validation::ensure_positive("amount", amount)?;
    }
    if let Some(paid_amount) = body.paid_amount {
        validation::ensure_positive("paid_amount", paid_amount)?;
    }
    Ok(())
}

/// POST /api/v1/payments — schedule an installment on one of the caller's
/// contracts. New payments are always pending.
pub async fn create_payment(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreatePayment>,
) -> impl Responder {
    let input = body.into_inner();
    if let Err(e) = validation::ensure_positive("amount", input.amount) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }

    if let Err(resp) = verify_contract_owner(db.get_ref(), input.contract_id, owner.id).await {
        return resp;
    }

    match payment_db::insert_payment(db.get_ref(), input).await {
        Ok(payment) => HttpResponse::Created().json(payment),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create payment: {e}"),
        })),
    }
}

/// GET /api/v1/payments — payments on the caller's contracts.
/// Query params: ?status=pending&contract_id=<uuid>&page=1&limit=20
pub async fn get_payments(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaymentListQuery>,
) -> impl Responder {
    let pagination = query.pagination();

    match payment_db::get_payments_by_owner_paginated(
        db.get_ref(),
        owner.id,
        query.status,
        query.contract_id,
        pagination.page(),
        pagination.limit(),
    )
    .await
    {
        Ok((payments, total)) => {
            HttpResponse::Ok().json(Paginated::new(payments, &pagination, total))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch payments: {e}"),
        })),
    }
}

/// GET /api/v1/payments/{id}
pub async fn get_payment(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    match verify_payment_owner(db.get_ref(), path.into_inner(), owner.id).await {
        Ok(payment) => HttpResponse::Ok().json(payment),
        Err(resp) => resp,
    }
}

/// PUT /api/v1/payments/{id} — partial update.
pub async fn update_payment(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePayment>,
) -> impl Responder {
    let payment_id = path.into_inner();
    if let Err(resp) = verify_payment_owner(db.get_ref(), payment_id, owner.id).await {
        return resp;
    }

    let input = body.into_inner();
    if let Err(e) = validate_update(&input) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }

    match payment_db::update_payment(db.get_ref(), payment_id, input).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update payment: {e}"),
        })),
    }
}

/// POST /api/v1/payments/{id}/pay — record settlement.
pub async fn mark_as_paid(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<MarkAsPaid>,
) -> impl Responder {
    let payment_id = path.into_inner();
    let payment = match verify_payment_owner(db.get_ref(), payment_id, owner.id).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    if matches!(payment.status, PaymentStatus::Paid | PaymentStatus::Cancelled) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!(
                "Payment is already {:?}. Only pending or overdue payments can be paid.",
                payment.status
            ),
        }));
    }

    let input = body.into_inner();
    if let Err(e) = validation::ensure_positive("paid_amount", input.paid_amount) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }

    match payment_db::mark_payment_as_paid(db.get_ref(), payment_id, input).await {
        Ok(updated) => {
            tracing::info!(payment_id = %updated.id, "Payment marked as paid");
            HttpResponse::Ok().json(updated)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to mark payment as paid: {e}"),
        })),
    }
}

/// DELETE /api/v1/payments/{id}
pub async fn delete_payment(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let payment_id = path.into_inner();
    if let Err(resp) = verify_payment_owner(db.get_ref(), payment_id, owner.id).await {
        return resp;
    }

    match payment_db::delete_payment(db.get_ref(), payment_id).await {
        Ok(result) if result.rows_affected > 0 => HttpResponse::Ok().json(serde_json::json!({
            "message": format!("Payment {payment_id} deleted"),
        })),
        Ok(_) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Payment {payment_id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete payment: {e}"),
        })),
    }
}

/// GET /api/v1/payments/contract/{contract_id}
pub async fn get_payments_by_contract(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let contract_id = path.into_inner();
    if let Err(resp) = verify_contract_owner(db.get_ref(), contract_id, owner.id).await {
        return resp;
    }

    match payment_db::get_payments_by_contract_id(db.get_ref(), contract_id).await {
        Ok(payments) => HttpResponse::Ok().json(payments),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/v1/payments/overdue
pub async fn get_overdue_payments(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    let now = chrono::Utc::now();

    match payment_db::get_overdue_payments_by_owner(db.get_ref(), owner.id, now).await {
        Ok(payments) => HttpResponse::Ok().json(payments),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/v1/payments/period?start_date=2024-01-01&end_date=2024-01-31
pub async fn get_payments_by_period(
    owner: AuthenticatedOwner,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PeriodQuery>,
) -> impl Responder {
    let PeriodQuery {
        start_date,
        end_date,
    } = query.into_inner();
    if end_date < start_date {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "end_date must not be before start_date",
        }));
    }

    match payment_db::get_payments_by_period(db.get_ref(), owner.id, start_date, end_date).await {
        Ok(payments) => HttpResponse::Ok().json(payments),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
