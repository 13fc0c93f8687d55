//! Deposit endpoints

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use super::{page_bounds, AppState};
use crate::middleware::CurrentUser;
use crate::models::deposit::{CreateDepositRequest, Deposit, DepositStatus};
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
pub struct DepositListQuery {
    pub status: Option<DepositStatus>,
    pub telegram_id: Option<i64>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

pub fn buyer_routes() -> Router<AppState> {
    Router::new().route("/deposits", post(create_deposit).get(list_my_deposits))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/deposits", get(list_deposits))
        .route("/deposits/:code/approve", post(approve_deposit))
        .route("/deposits/:code/reject", post(reject_deposit))
}

async fn create_deposit(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Json(request): Json<CreateDepositRequest>,
) -> Result<Json<Deposit>> {
    let deposit = state
        .services
        .deposit_service
        .create_deposit(ctx.telegram_id, request)
        .await?;

    Ok(Json(deposit))
}

async fn list_my_deposits(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Query(query): Query<DepositListQuery>,
) -> Result<Json<Vec<Deposit>>> {
    let (limit, offset) = page_bounds(query.page, query.page_size);
    let deposits = state
        .services
        .deposit_service
        .list_deposits(Some(ctx.telegram_id), query.status, limit, offset)
        .await?;

    Ok(Json(deposits))
}

async fn list_deposits(
    State(state): State<AppState>,
    Query(query): Query<DepositListQuery>,
) -> Result<Json<Vec<Deposit>>> {
    let (limit, offset) = page_bounds(query.page, query.page_size);
    let deposits = state
        .services
        .deposit_service
        .list_deposits(query.telegram_id, query.status, limit, offset)
        .await?;

    Ok(Json(deposits))
}

async fn approve_deposit(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(code): Path<String>,
) -> Result<Json<Deposit>> {
    let deposit = state
        .services
        .deposit_service
        .approve_deposit(&code, ctx.telegram_id)
        .await?;

    Ok(Json(deposit))
}

async fn reject_deposit(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(code): Path<String>,
    Json(request): Json<RejectRequest>,
) -> Result<Json<Deposit>> {
    let deposit = state
        .services
        .deposit_service
        .reject_deposit(&code, ctx.telegram_id, &request.reason)
        .await?;

    Ok(Json(deposit))
}
