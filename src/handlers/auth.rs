use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::auth::middleware::AuthenticatedOwner;
use crate::auth::{jwt, password};
use crate::config::AppConfig;
use crate::db::owners as owner_db;
use crate::models::owners::OwnerResponse;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub owner: OwnerResponse,
}

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({
        "error": "invalid credentials",
    }))
}

/// POST /api/v1/auth/login — exchange email + password for a bearer token.
///
/// Unknown email and wrong password answer the same 401.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
    body: web::Json<LoginRequest>,
) -> impl Responder {
    let LoginRequest { email, password } = body.into_inner();

    let owner = match owner_db::get_owner_by_email(db.get_ref(), email.trim()).await {
        Ok(Some(owner)) => owner,
        Ok(None) => return invalid_credentials(),
        Err(e) => {
            tracing::error!("Failed to look up owner by email: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match password::verify_password(&password, &owner.password_hash) {
        Ok(true) => {}
        Ok(false) => return invalid_credentials(),
        Err(e) => {
            tracing::error!(owner_id = %owner.id, "Password verification failed: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to verify credentials",
            }));
        }
    }

    let ttl = chrono::Duration::hours(config.token_ttl_hours);
    match jwt::issue_token(owner.id, &owner.email, &config.jwt_secret, ttl) {
        Ok((token, expires_at)) => {
            tracing::info!(owner_id = %owner.id, "Owner logged in");
            HttpResponse::Ok().json(LoginResponse {
                token,
                expires_at,
                owner: OwnerResponse::from(owner),
            })
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to issue token: {e}"),
        })),
    }
}

/// GET /api/v1/auth/me — the authenticated owner's profile.
pub async fn me(owner: AuthenticatedOwner, db: web::Data<DatabaseConnection>) -> impl Responder {
    match owner_db::get_owner_by_id(db.get_ref(), owner.id).await {
        Ok(Some(found)) => HttpResponse::Ok().json(OwnerResponse::from(found)),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Owner {} not found", owner.id),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
