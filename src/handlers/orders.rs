//! Order endpoints
//!
//! Buyers place and list their own orders; admins list all orders and
//! process pending ones. Processing uses display codes, never internal ids.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use super::{page_bounds, AppState};
use crate::middleware::CurrentUser;
use crate::models::order::{CreateOrderRequest, Order, OrderStatus};
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    pub telegram_id: Option<i64>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

pub fn buyer_routes() -> Router<AppState> {
    Router::new().route("/orders", post(place_order).get(list_my_orders))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/:code/approve", post(approve_order))
        .route("/orders/:code/reject", post(reject_order))
}

async fn place_order(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<Order>> {
    let order = state
        .services
        .order_service
        .place_order(ctx.telegram_id, request)
        .await?;

    Ok(Json(order))
}

async fn list_my_orders(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<Order>>> {
    let (limit, offset) = page_bounds(query.page, query.page_size);
    let orders = state
        .services
        .order_service
        .list_orders(Some(ctx.telegram_id), query.status, limit, offset)
        .await?;

    Ok(Json(orders))
}

async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<Order>>> {
    let (limit, offset) = page_bounds(query.page, query.page_size);
    let orders = state
        .services
        .order_service
        .list_orders(query.telegram_id, query.status, limit, offset)
        .await?;

    Ok(Json(orders))
}

async fn approve_order(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(code): Path<String>,
) -> Result<Json<Order>> {
    let order = state
        .services
        .order_service
        .approve_order(&code, ctx.telegram_id)
        .await?;

    Ok(Json(order))
}

async fn reject_order(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(code): Path<String>,
    Json(request): Json<RejectRequest>,
) -> Result<Json<Order>> {
    let order = state
        .services
        .order_service
        .reject_order(&code, ctx.telegram_id, &request.reason)
        .await?;

    Ok(Json(order))
}
