//! User and ban-management endpoints
//!
//! Buyers read their own profile; admins list users, adjust balances, and
//! manage the ban set.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use super::{page_bounds, AppState};
use crate::middleware::CurrentUser;
use crate::models::ban::BannedUser;
use crate::models::user::User;
use crate::services::balance::BalanceOp;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct BanRequest {
    pub reason: String,
}

pub fn buyer_routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:telegram_id", get(get_user))
        .route("/users/:telegram_id/balance", put(adjust_balance))
        .route("/users/:telegram_id/ban", post(ban_user))
        .route("/users/:telegram_id/unban", post(unban_user))
        .route("/banned", get(list_banned))
}

async fn me(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
) -> Result<Json<User>> {
    let user = state
        .services
        .user_service
        .get_by_telegram_id(ctx.telegram_id)
        .await?;

    Ok(Json(user))
}

async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Value>> {
    let (limit, offset) = page_bounds(query.page, query.page_size);
    let users = state.services.user_service.list(limit, offset).await?;
    let total = state.services.user_service.count().await?;

    Ok(Json(json!({ "users": users, "total": total })))
}

async fn get_user(
    State(state): State<AppState>,
    Path(telegram_id): Path<i64>,
) -> Result<Json<User>> {
    let user = state
        .services
        .user_service
        .get_by_telegram_id(telegram_id)
        .await?;

    Ok(Json(user))
}

async fn adjust_balance(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(telegram_id): Path<i64>,
    Json(op): Json<BalanceOp>,
) -> Result<Json<User>> {
    let user = state
        .services
        .balance_service
        .adjust_by_admin(telegram_id, op, ctx.telegram_id)
        .await?;

    Ok(Json(user))
}

async fn ban_user(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(telegram_id): Path<i64>,
    Json(request): Json<BanRequest>,
) -> Result<Json<Value>> {
    let newly_banned = state
        .services
        .ban_service
        .ban_user(telegram_id, &request.reason, ctx.telegram_id)
        .await?;

    Ok(Json(json!({ "banned": true, "newly_banned": newly_banned })))
}

async fn unban_user(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(telegram_id): Path<i64>,
) -> Result<Json<Value>> {
    let removed = state
        .services
        .ban_service
        .unban_user(telegram_id, ctx.telegram_id)
        .await?;

    Ok(Json(json!({ "banned": false, "was_banned": removed })))
}

async fn list_banned(State(state): State<AppState>) -> Result<Json<Vec<BannedUser>>> {
    let banned = state.services.ban_service.list_banned().await?;

    Ok(Json(banned))
}
