//! Authentication middleware
//!
//! Every protected route passes through `require_auth`: it verifies the
//! Telegram init data carried in the `Authorization: tma <init-data>`
//! header, rejects banned identities before any ledger operation is
//! reachable, and attaches the resulting `AuthContext` to the request.
//! Admin routes additionally pass through `require_admin`.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use crate::handlers::AppState;
use crate::services::auth::AuthContext;
use crate::utils::errors::StoreError;

const AUTH_SCHEME: &str = "tma ";

/// Verify init data and gate banned users
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StoreError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| StoreError::Authentication("missing authorization header".to_string()))?;

    let init_data = header
        .strip_prefix(AUTH_SCHEME)
        .ok_or_else(|| StoreError::Authentication("expected 'tma' auth scheme".to_string()))?;

    let ctx = state.services.auth_service.authenticate(init_data)?;

    if let Some(banned) = state.services.ban_service.check(ctx.telegram_id).await? {
        return Err(StoreError::Banned {
            reason: banned.reason,
        });
    }

    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}

/// Reject non-admin identities; must run after `require_auth`
pub async fn require_admin(req: Request, next: Next) -> Result<Response, StoreError> {
    let is_admin = req
        .extensions()
        .get::<AuthContext>()
        .map(|ctx| ctx.is_admin)
        .unwrap_or(false);

    if !is_admin {
        return Err(StoreError::PermissionDenied(
            "admin access required".to_string(),
        ));
    }

    Ok(next.run(req).await)
}

/// Extractor for the authenticated identity attached by `require_auth`
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthContext);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = StoreError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| StoreError::Authentication("not authenticated".to_string()))
    }
}
