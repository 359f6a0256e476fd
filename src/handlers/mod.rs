pub mod auth;
pub mod contracts;
pub mod dashboard;
pub mod health;
pub mod owners;
pub mod payments;
pub mod properties;
pub mod tenants;

use actix_web::web;
use sea_orm::DatabaseConnection;

/// Liveness and readiness probes, mounted at the root.
pub fn init_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health))
        .route("/ready", web::get().to(health::ready));
}

/// Everything under `/api/v1`.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes ──
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(auth::login))
            .route("/me", web::get().to(auth::me)),
    );

    // ── Owner routes (registration is public, the rest require a JWT) ──
    cfg.service(
        web::scope("/owners")
            .route("", web::post().to(owners::create_owner))
            .route("", web::get().to(owners::get_owners))
            .route("/email/{email}", web::get().to(owners::get_owner_by_email))
            .route("/{id}", web::get().to(owners::get_owner))
            .route("/{id}", web::put().to(owners::update_owner))
            .route("/{id}", web::delete().to(owners::delete_owner)),
    );

    // ── Tenant routes ──
    cfg.service(
        web::scope("/tenants")
            .route("", web::get().to(tenants::get_tenants))
            .route("", web::post().to(tenants::create_tenant))
            .route("/owner/{owner_id}", web::get().to(tenants::get_tenants_by_owner))
            .route("/{id}", web::get().to(tenants::get_tenant))
            .route("/{id}", web::put().to(tenants::update_tenant))
            .route("/{id}", web::delete().to(tenants::delete_tenant)),
    );

    // ── Property routes ──
    cfg.service(
        web::scope("/properties")
            .route("", web::get().to(properties::get_properties))
            .route("", web::post().to(properties::create_property))
            .route(
                "/owner/{owner_id}",
                web::get().to(properties::get_properties_by_owner),
            )
            .route("/{id}", web::get().to(properties::get_property))
            .route("/{id}", web::put().to(properties::update_property))
            .route("/{id}", web::delete().to(properties::delete_property)),
    );

    // ── Contract routes ──
    cfg.service(
        web::scope("/contracts")
            .route("", web::get().to(contracts::get_contracts))
            .route("", web::post().to(contracts::create_contract))
            .route(
                "/property/{property_id}",
                web::get().to(contracts::get_contracts_by_property),
            )
            .route(
                "/property/{property_id}/active",
                web::get().to(contracts::get_active_contract_by_property),
            )
            .route(
                "/tenant/{tenant_id}",
                web::get().to(contracts::get_contracts_by_tenant),
            )
            .route("/{id}", web::get().to(contracts::get_contract))
            .route("/{id}", web::put().to(contracts::update_contract))
            .route("/{id}", web::delete().to(contracts::delete_contract))
            .route("/{id}/cancel", web::put().to(contracts::cancel_contract)),
    );

    // ── Payment routes (static segments before /{id}) ──
    cfg.service(
        web::scope("/payments")
            .route("", web::get().to(payments::get_payments))
            .route("", web::post().to(payments::create_payment))
            .route("/overdue", web::get().to(payments::get_overdue_payments))
            .route("/period", web::get().to(payments::get_payments_by_period))
            .route(
                "/contract/{contract_id}",
                web::get().to(payments::get_payments_by_contract),
            )
            .route("/{id}", web::get().to(payments::get_payment))
            .route("/{id}", web::put().to(payments::update_payment))
            .route("/{id}", web::delete().to(payments::delete_payment))
            .route("/{id}/pay", web::post().to(payments::mark_as_paid)),
    );

    // ── Dashboard ──
    cfg.service(web::scope("/dashboard").route(
        "/owner/{owner_id}",
        web::get().to(dashboard::get_dashboard::<DatabaseConnection>),
    ));
}
