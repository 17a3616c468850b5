//! OpenAPI documentation configuration.

use actix_web::{HttpResponse, get, web};
use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Balance Service",
        version = "0.1.0",
        description = "Minimal balance-management API with transactional credit/debit"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        api::health::health,
        api::health::ready,
        api::balance::update_balance,
        api::balance::get_balance,
    ),
    components(
        schemas(
            error::ErrorResponse,
            api::health::HealthResponse,
            api::health::ReadyResponse,
            models::balance::UpdateBalanceRequest,
            models::balance::BalanceResponse,
        )
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
#[get("/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Configure OpenAPI routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(openapi_json);
}
