//! End-to-end scenario tests for the balance endpoints.
//!
//! Runs the real handlers against a mock database backend: each request
//! consumes the next prepared query results in order, so these tests also pin
//! down exactly which statements the handlers issue.

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use serde_json::{Value, json};

use balance_service::api;
use balance_service::db::DbPool;
use balance_service::entity::account;
use balance_service::error::AppError;

fn account_row(balance: i64) -> account::Model {
    let now = Utc::now();
    account::Model {
        id: 1,
        balance,
        created_at: now,
        updated_at: now,
    }
}

async fn spawn_app(
    db: DatabaseConnection,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(DbPool::from_connection(db)))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::InvalidInput(err.to_string()).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::InvalidInput(err.to_string()).into()
            }))
            .configure(api::configure_balance_routes),
    )
    .await
}

/// Fresh-database walkthrough: lookup the seeded balance, debit it to zero,
/// then get refused on an overdraw with the balance unchanged.
#[actix_web::test]
async fn seeded_account_scenario() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // GET /balance/1
        .append_query_results([vec![account_row(10_000)]])
        // POST -10000: locked read, then update returning the new row
        .append_query_results([vec![account_row(10_000)], vec![account_row(0)]])
        // POST -1: locked read only, the overdraw is refused before any write
        .append_query_results([vec![account_row(0)]])
        .into_connection();

    let app = spawn_app(db).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/balance/1").to_request())
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "balance": 10000 }));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/update-balance")
            .set_json(json!({ "userId": 1, "amount": -10000 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "balance": 0 }));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/update-balance")
            .set_json(json!({ "userId": 1, "amount": -1 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Insufficient funds" }));
}

/// Validation failures must answer before any store access: no query results
/// are prepared, so a store round-trip would change the error message.
#[actix_web::test]
async fn validation_rejects_before_store_access() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = spawn_app(db).await;

    for body in [
        json!({ "userId": 1 }),
        json!({ "amount": 50 }),
        json!({}),
        json!({ "userId": 1, "amount": 0 }),
        json!({ "userId": 0, "amount": 50 }),
        json!({ "userId": null, "amount": 50 }),
    ] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/update-balance")
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "userId and amount are required" }));
    }
}

/// String-typed identifiers and amounts are accepted for compatibility with
/// loosely-typed clients.
#[actix_web::test]
async fn accepts_integer_strings() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![account_row(10_000)], vec![account_row(9_750)]])
        .into_connection();

    let app = spawn_app(db).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/update-balance")
            .set_json(json!({ "userId": "1", "amount": "-250" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "balance": 9750 }));
}

/// A non-numeric path identifier is a valid HTTP request and must still get
/// the service's JSON error shape, not the extractor's plain-text default.
#[actix_web::test]
async fn rejects_non_numeric_path_id_with_json_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = spawn_app(db).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/balance/abc").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

/// Fractional amounts are rejected with the service's JSON error shape.
#[actix_web::test]
async fn rejects_fractional_amount() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = spawn_app(db).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/update-balance")
            .set_json(json!({ "userId": 1, "amount": 10.5 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}
