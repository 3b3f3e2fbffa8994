use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::AuthCtx;

/// Handler で、 AuthCtx を受け取るための extractor
/// authenticate middleware が AuthCtx を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（未認証・ミドルウェア未設定）
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(AppError::Unauthorized)
    }
}

/// 認証の有無を問わずに AuthCtx を受け取る extractor (guard が使う)
pub struct MaybeAuthCtx(pub Option<AuthCtx>);

impl<S> FromRequestParts<S> for MaybeAuthCtx
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthCtx(parts.extensions.get::<AuthCtx>().cloned()))
    }
}
