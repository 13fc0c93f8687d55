//! Catalog endpoints
//!
//! Buyers browse active catalog entries; admins manage the full catalog
//! including inactive entries and the store profile.

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use super::AppState;
use crate::models::catalog::*;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct InputFieldQuery {
    pub category_id: Option<i64>,
}

pub fn buyer_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog/categories", get(list_categories))
        .route("/catalog/products", get(list_products))
        .route("/catalog/payment-methods", get(list_payment_methods))
        .route("/catalog/banners", get(list_banners))
        .route("/catalog/input-fields", get(list_input_fields))
        .route("/catalog/profile", get(get_profile))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog/categories", get(admin_list_categories).post(create_category))
        .route(
            "/catalog/categories/:id",
            put(update_category).delete(delete_category),
        )
        .route("/catalog/products", get(admin_list_products).post(create_product))
        .route(
            "/catalog/products/:id",
            put(update_product).delete(delete_product),
        )
        .route(
            "/catalog/payment-methods",
            get(admin_list_payment_methods).post(create_payment_method),
        )
        .route(
            "/catalog/payment-methods/:id",
            put(update_payment_method).delete(delete_payment_method),
        )
        .route("/catalog/banners", get(admin_list_banners).post(create_banner))
        .route("/catalog/banners/:id", delete(delete_banner))
        .route(
            "/catalog/input-fields",
            get(list_input_fields).post(create_input_field),
        )
        .route("/catalog/input-fields/:id", delete(delete_input_field))
        .route("/catalog/profile", get(get_profile).put(update_profile))
}

// --- categories ---

async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.services.catalog_service.list_categories(true).await?;
    Ok(Json(categories))
}

async fn admin_list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.services.catalog_service.list_categories(false).await?;
    Ok(Json(categories))
}

async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<UpsertCategoryRequest>,
) -> Result<Json<Category>> {
    let category = state.services.catalog_service.create_category(request).await?;
    Ok(Json(category))
}

async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpsertCategoryRequest>,
) -> Result<Json<Category>> {
    let category = state
        .services
        .catalog_service
        .update_category(id, request)
        .await?;
    Ok(Json(category))
}

async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    state.services.catalog_service.delete_category(id).await?;
    Ok(Json(json!({ "deleted": true })))
}

// --- products ---

async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state
        .services
        .catalog_service
        .list_products(query.category_id, true)
        .await?;
    Ok(Json(products))
}

async fn admin_list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state
        .services
        .catalog_service
        .list_products(query.category_id, false)
        .await?;
    Ok(Json(products))
}

async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<UpsertProductRequest>,
) -> Result<Json<Product>> {
    let product = state.services.catalog_service.create_product(request).await?;
    Ok(Json(product))
}

async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpsertProductRequest>,
) -> Result<Json<Product>> {
    let product = state
        .services
        .catalog_service
        .update_product(id, request)
        .await?;
    Ok(Json(product))
}

async fn delete_product(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Value>> {
    state.services.catalog_service.delete_product(id).await?;
    Ok(Json(json!({ "deleted": true })))
}

// --- payment methods ---

async fn list_payment_methods(State(state): State<AppState>) -> Result<Json<Vec<PaymentMethod>>> {
    let methods = state
        .services
        .catalog_service
        .list_payment_methods(true)
        .await?;
    Ok(Json(methods))
}

async fn admin_list_payment_methods(
    State(state): State<AppState>,
) -> Result<Json<Vec<PaymentMethod>>> {
    let methods = state
        .services
        .catalog_service
        .list_payment_methods(false)
        .await?;
    Ok(Json(methods))
}

async fn create_payment_method(
    State(state): State<AppState>,
    Json(request): Json<UpsertPaymentMethodRequest>,
) -> Result<Json<PaymentMethod>> {
    let method = state
        .services
        .catalog_service
        .create_payment_method(request)
        .await?;
    Ok(Json(method))
}

async fn update_payment_method(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpsertPaymentMethodRequest>,
) -> Result<Json<PaymentMethod>> {
    let method = state
        .services
        .catalog_service
        .update_payment_method(id, request)
        .await?;
    Ok(Json(method))
}

async fn delete_payment_method(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    state
        .services
        .catalog_service
        .delete_payment_method(id)
        .await?;
    Ok(Json(json!({ "deleted": true })))
}

// --- banners ---

async fn list_banners(State(state): State<AppState>) -> Result<Json<Vec<Banner>>> {
    let banners = state.services.catalog_service.list_banners(true).await?;
    Ok(Json(banners))
}

async fn admin_list_banners(State(state): State<AppState>) -> Result<Json<Vec<Banner>>> {
    let banners = state.services.catalog_service.list_banners(false).await?;
    Ok(Json(banners))
}

async fn create_banner(
    State(state): State<AppState>,
    Json(request): Json<UpsertBannerRequest>,
) -> Result<Json<Banner>> {
    let banner = state.services.catalog_service.create_banner(request).await?;
    Ok(Json(banner))
}

async fn delete_banner(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Value>> {
    state.services.catalog_service.delete_banner(id).await?;
    Ok(Json(json!({ "deleted": true })))
}

// --- checkout input fields ---

async fn list_input_fields(
    State(state): State<AppState>,
    Query(query): Query<InputFieldQuery>,
) -> Result<Json<Vec<InputField>>> {
    let fields = state
        .services
        .catalog_service
        .list_input_fields(query.category_id)
        .await?;
    Ok(Json(fields))
}

async fn create_input_field(
    State(state): State<AppState>,
    Json(request): Json<UpsertInputFieldRequest>,
) -> Result<Json<InputField>> {
    let field = state
        .services
        .catalog_service
        .create_input_field(request)
        .await?;
    Ok(Json(field))
}

async fn delete_input_field(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    state.services.catalog_service.delete_input_field(id).await?;
    Ok(Json(json!({ "deleted": true })))
}

// --- store profile ---

async fn get_profile(State(state): State<AppState>) -> Result<Json<StoreProfile>> {
    let profile = state.services.catalog_service.get_store_profile().await?;
    Ok(Json(profile))
}

async fn update_profile(
    State(state): State<AppState>,
    Json(request): Json<UpdateStoreProfileRequest>,
) -> Result<Json<StoreProfile>> {
    let profile = state
        .services
        .catalog_service
        .update_store_profile(request)
        .await?;
    Ok(Json(profile))
}
