///! HTTP tests for `GET /api/v1/dashboard/owner/{owner_id}`, served from an
///! in-memory store. No database is needed.
///!
///! Run with: `cargo test --test dashboard_handler_test`
mod common;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::Duration;
use rust_decimal_macros::dec;
use uuid::Uuid;

use aluguei_backend::auth::jwt::issue_token;
use aluguei_backend::auth::middleware::JwtSecret;
use aluguei_backend::handlers::dashboard::get_dashboard;
use aluguei_backend::models::contracts::ContractStatus;
use aluguei_backend::models::payments::PaymentStatus;
use aluguei_backend::models::properties::PropertyStatus;

use common::{FailOn, InMemoryStore, TEST_SECRET, date};

fn bearer(owner_id: Uuid) -> (&'static str, String) {
    let (token, _) = issue_token(owner_id, "owner@example.com", TEST_SECRET, Duration::hours(1))
        .expect("Token should be issued");
    ("Authorization", format!("Bearer {token}"))
}

fn seeded_store(owner_id: Uuid) -> InMemoryStore {
    let mut store = InMemoryStore::new();
    let flat = store.add_property(owner_id, PropertyStatus::Rented, "Apto 301");
    store.add_property(owner_id, PropertyStatus::Available, "Casa Verde");
    let tenant = store.add_tenant(owner_id, "Maria Souza");
    let contract = store.add_contract(
        flat,
        tenant,
        ContractStatus::Active,
        date(2024, 1, 1),
        date(2999, 1, 1),
        dec!(1000),
    );
    store.add_payment(
        contract,
        PaymentStatus::Paid,
        dec!(1000),
        date(2024, 2, 5),
        Some((dec!(1000), date(2024, 2, 1))),
    );
    store
}

macro_rules! dashboard_app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(JwtSecret(TEST_SECRET.to_string())))
                .app_data($store.clone())
                .route(
                    "/api/v1/dashboard/owner/{owner_id}",
                    web::get().to(get_dashboard::<InMemoryStore>),
                ),
        )
        .await
    };
}

#[actix_web::test]
async fn test_invalid_owner_id_is_rejected_without_store_calls() {
    let owner_id = Uuid::new_v4();
    let store = web::Data::new(seeded_store(owner_id));
    let app = dashboard_app!(store);

    let req = test::TestRequest::get()
        .uri("/api/v1/dashboard/owner/not-a-uuid")
        .insert_header(bearer(owner_id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({ "error": "invalid owner id" }));
    assert_eq!(store.calls(), 0);
}

#[actix_web::test]
async fn test_missing_token_is_unauthorized() {
    let owner_id = Uuid::new_v4();
    let store = web::Data::new(seeded_store(owner_id));
    let app = dashboard_app!(store);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/dashboard/owner/{owner_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.calls(), 0);
}

#[actix_web::test]
async fn test_other_owners_dashboard_is_forbidden() {
    let owner_id = Uuid::new_v4();
    let store = web::Data::new(seeded_store(owner_id));
    let app = dashboard_app!(store);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/dashboard/owner/{owner_id}"))
        .insert_header(bearer(Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(store.calls(), 0);
}

#[actix_web::test]
async fn test_report_json_shape() {
    let owner_id = Uuid::new_v4();
    let store = web::Data::new(seeded_store(owner_id));
    let app = dashboard_app!(store);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/dashboard/owner/{owner_id}"))
        .insert_header(bearer(owner_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["total_properties"], 2);
    assert_eq!(body["rented_properties"], 1);
    assert_eq!(body["available_properties"], 1);
    assert_eq!(body["monthly_revenue"].as_f64(), Some(1000.0));
    assert_eq!(body["pending_payments"], 0);
    assert_eq!(body["overdue_payments"], 0);

    let recent = body["recent_payments"].as_array().unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0]["tenant"], "Maria Souza");
    assert_eq!(recent[0]["property"], "Apto 301");
    assert_eq!(recent[0]["amount"].as_f64(), Some(1000.0));
    assert_eq!(recent[0]["date"], "2024-02-01");
    assert!(Uuid::parse_str(recent[0]["id"].as_str().unwrap()).is_ok());

    let series = body["monthly_revenues"].as_array().unwrap();
    assert_eq!(series.len(), 4);
    assert!(series.iter().all(|p| p["month"].as_str().unwrap().len() == 3));
    assert!(series.iter().all(|p| p["revenue"].is_number()));

    assert_eq!(
        body["property_status"],
        serde_json::json!([
            { "status": "rented", "count": 1 },
            { "status": "available", "count": 1 },
        ])
    );
}

#[actix_web::test]
async fn test_store_failure_is_a_server_error() {
    let owner_id = Uuid::new_v4();
    let store = web::Data::new(seeded_store(owner_id));
    store.fail_on(FailOn::Payments);
    let app = dashboard_app!(store);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/dashboard/owner/{owner_id}"))
        .insert_header(bearer(owner_id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("payments"));
}
