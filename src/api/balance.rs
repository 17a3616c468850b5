//! Balance API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::db::{DbPool, accounts};
use crate::error::{AppError, AppResult};
use crate::models::{BalanceResponse, UpdateBalanceRequest};

/// Apply a signed delta to an account's balance.
///
/// Runs inside a single store transaction holding an exclusive row lock, so
/// concurrent updates of the same account never lose a write.
#[utoipa::path(
    post,
    path = "/update-balance",
    tag = "Balance",
    request_body = UpdateBalanceRequest,
    responses(
        (status = 200, description = "Balance updated", body = BalanceResponse),
        (status = 400, description = "Validation failure, unknown account, or insufficient funds", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_balance(
    pool: web::Data<DbPool>,
    body: web::Json<UpdateBalanceRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // A missing, null, or zero field is rejected before any store access.
    let (user_id, amount) = match (req.user_id, req.amount) {
        (Some(user_id), Some(amount)) if user_id != 0 && amount != 0 => (user_id, amount),
        _ => return Err(AppError::missing_fields()),
    };

    let balance = accounts::apply_delta(pool.connection(), user_id, amount).await?;

    info!(
        "Balance updated: account={}, delta={}, balance={}",
        user_id, amount, balance
    );

    Ok(HttpResponse::Ok().json(BalanceResponse { balance }))
}

/// Look up the current balance of an account.
///
/// Single unlocked read; concurrent mutations are tolerated at the store's
/// default read-committed visibility.
#[utoipa::path(
    get,
    path = "/balance/{user_id}",
    tag = "Balance",
    params(
        ("user_id" = i64, Path, description = "Account identifier")
    ),
    responses(
        (status = 200, description = "Current balance", body = BalanceResponse),
        (status = 400, description = "Store failure", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown account", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_balance(pool: web::Data<DbPool>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();

    let account = accounts::find_by_id(pool.connection(), user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    Ok(HttpResponse::Ok().json(BalanceResponse {
        balance: account.balance,
    }))
}

/// Configure balance routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/update-balance").route(web::post().to(update_balance)))
        .service(web::resource("/balance/{user_id}").route(web::get().to(get_balance)));
}
