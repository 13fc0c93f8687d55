//! Admin broadcast endpoint

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;
use super::AppState;
use crate::middleware::CurrentUser;
use crate::services::BroadcastOutcome;
use crate::utils::errors::{Result, StoreError};

#[derive(Debug, Deserialize)]
pub struct BroadcastRequest {
    pub text: String,
    pub image_file_id: Option<String>,
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/broadcast", post(broadcast))
}

async fn broadcast(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Json(request): Json<BroadcastRequest>,
) -> Result<Json<BroadcastOutcome>> {
    if request.text.trim().is_empty() {
        return Err(StoreError::InvalidInput(
            "broadcast text must not be empty".to_string(),
        ));
    }

    let recipients = state.services.user_service.all_telegram_ids().await?;
    info!(
        admin_id = ctx.telegram_id,
        recipients = recipients.len(),
        "Broadcast requested"
    );

    let outcome = state
        .services
        .notification_service
        .broadcast(&recipients, &request.text, request.image_file_id.as_deref())
        .await;

    Ok(Json(outcome))
}
