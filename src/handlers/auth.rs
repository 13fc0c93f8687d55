//! Login endpoint
//!
//! The only route outside the auth middleware: it validates init data
//! itself, upserts the profile, and reports ban status instead of
//! rejecting, so the client can render the "account suspended" screen.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use super::AppState;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub init_data: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/auth/login", post(login))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>> {
    let ctx = state.services.auth_service.authenticate(&request.init_data)?;
    let user = state.services.user_service.register_or_refresh(&ctx).await?;
    let banned = state.services.ban_service.check(ctx.telegram_id).await?;

    Ok(Json(json!({
        "user": user,
        "is_admin": ctx.is_admin,
        "banned": banned.is_some(),
        "ban_reason": banned.map(|b| b.reason),
    })))
}
