/*
 * Responsibility
 * - GET /auth/me : authenticate middleware が載せた AuthCtx をそのまま返す
 */
use axum::Json;

use crate::api::v1::extractors::{AuthCtx, AuthCtxExtractor};

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<AuthCtx> {
    Json(ctx)
}
