//! Authorization guards, applied per route with `route_layer`.
//!
//! They only read the `AuthCtx` left by `authenticate` and delegate the decision
//! to `services::auth::policy`. A rejection becomes `AppError::Unauthorized` (401).

use std::collections::HashMap;

use axum::{
    body::Body,
    extract::Path,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::api::v1::extractors::MaybeAuthCtx;
use crate::error::AppError;
use crate::services::auth::policy;

pub async fn require_logged_in(
    MaybeAuthCtx(ctx): MaybeAuthCtx,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    policy::ensure_logged_in(ctx.as_ref())?;

    Ok(next.run(req).await)
}

pub async fn require_admin(
    MaybeAuthCtx(ctx): MaybeAuthCtx,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    policy::ensure_admin(ctx.as_ref()).inspect_err(|_| {
        tracing::debug!(user = ?ctx.as_ref().map(|c| &c.username), "admin required");
    })?;

    Ok(next.run(req).await)
}

/// For routes declaring `{username}`; the owner check compares it against `AuthCtx::username`.
pub async fn require_user_or_admin(
    MaybeAuthCtx(ctx): MaybeAuthCtx,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let target = params.get("username").map(String::as_str).unwrap_or_default();

    policy::ensure_correct_user_or_admin(ctx.as_ref(), target).inspect_err(|_| {
        tracing::debug!(
            user = ?ctx.as_ref().map(|c| &c.username),
            target = %target,
            "owner or admin required"
        );
    })?;

    Ok(next.run(req).await)
}
