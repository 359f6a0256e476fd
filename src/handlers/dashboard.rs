use actix_web::{HttpResponse, Responder, web};

use crate::auth::middleware::AuthenticatedOwner;
use crate::dashboard::{self, Dashboard, DashboardError, PortfolioStore};

/// GET /api/v1/dashboard/owner/{owner_id} — portfolio summary for one owner.
///
/// The id is validated before anything else so a malformed one never reaches
/// the store. Owners can only read their own dashboard.
pub async fn get_dashboard<S: PortfolioStore + 'static>(
    owner: AuthenticatedOwner,
    store: web::Data<S>,
    path: web::Path<String>,
) -> impl Responder {
    let owner_id = match dashboard::parse_owner_id(&path) {
        Ok(id) => id,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
        }
    };

    if owner.id != owner_id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only view your own dashboard",
        }));
    }

    let dashboard = Dashboard::new(store.get_ref());
    match dashboard.report_for_owner(owner_id, chrono::Utc::now()).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e @ DashboardError::InvalidInput(_)) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
        Err(e @ DashboardError::UpstreamFailure { .. }) => {
            tracing::error!(%owner_id, "Dashboard failed: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}
