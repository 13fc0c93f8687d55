//! HTTP handlers module
//!
//! Route handlers for the Mini App client and the admin panel, assembled
//! into one axum router. Buyer routes require a verified Telegram identity;
//! admin routes additionally require a configured admin identity.

pub mod auth;
pub mod broadcast;
pub mod catalog;
pub mod deposits;
pub mod orders;
pub mod users;

use std::sync::Arc;
use axum::http::StatusCode;
use axum::middleware as axum_middleware;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::config::Settings;
use crate::middleware::{require_admin, require_auth};
use crate::services::ServiceFactory;

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<ServiceFactory>,
    pub settings: Settings,
}

/// Pagination defaults shared by list endpoints
pub(crate) const DEFAULT_PAGE_SIZE: i64 = 50;
pub(crate) const MAX_PAGE_SIZE: i64 = 200;

pub(crate) fn page_bounds(page: Option<i64>, page_size: Option<i64>) -> (i64, i64) {
    let limit = page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = (page.unwrap_or(1).max(1) - 1) * limit;
    (limit, offset)
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let buyer_routes = Router::new()
        .merge(users::buyer_routes())
        .merge(catalog::buyer_routes())
        .merge(orders::buyer_routes())
        .merge(deposits::buyer_routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let admin_routes = Router::new()
        .merge(users::admin_routes())
        .merge(catalog::admin_routes())
        .merge(orders::admin_routes())
        .merge(deposits::admin_routes())
        .merge(broadcast::admin_routes())
        .layer(axum_middleware::from_fn(require_admin))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .merge(auth::routes())
        .nest("/api", buyer_routes)
        .nest("/api/admin", admin_routes)
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_bounds() {
        assert_eq!(page_bounds(None, None), (50, 0));
        assert_eq!(page_bounds(Some(3), Some(20)), (20, 40));
        assert_eq!(page_bounds(Some(0), Some(0)), (1, 0));
        assert_eq!(page_bounds(Some(1), Some(1000)), (200, 0));
    }
}
