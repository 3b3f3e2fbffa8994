//! Bearer token → AuthCtx を extensions に入れる (認証のみ・拒否はしない)
//!
//! - `Authorization: Bearer <jwt>` を検証し、成功したら `AuthCtx` を request extensions に格納する
//! - ヘッダ無し / scheme 違い / 署名不正 / 期限切れ は「未認証」として素通しする
//! - 拒否するかどうかは guards (route_layer) 側の責務

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::services::auth::AuthService;

/// 認証 middleware を router 全体に適用する。
///
/// 例：
/// ```ignore
/// let app = Router::new().nest("/api/v1", api::v1::routes()).with_state(state.clone());
/// let app = middleware::auth::authenticate::apply(app, state.auth.clone());
/// ```
pub fn apply<S>(router: Router<S>, auth: Arc<AuthService>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(auth, authenticate_middleware))
}

async fn authenticate_middleware(
    State(auth): State<Arc<AuthService>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(ctx) = authenticate(req.headers(), &auth) {
        // middleware → extractor / guard への受け渡し
        req.extensions_mut().insert(ctx);
    }

    next.run(req).await
}

/// Resolve the caller's identity from the headers, or `None` if there is no usable credential.
pub fn authenticate(headers: &HeaderMap, auth: &AuthService) -> Option<AuthCtx> {
    let token = bearer_token(headers)?;

    match auth.verify(token) {
        Ok(claims) => Some(claims.into()),
        Err(err) => {
            tracing::debug!(error = %err, "bearer token rejected; continuing unauthenticated");
            None
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();

    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    const SECRET: &[u8] = b"test-secret";

    fn headers_with(authorization: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(authorization).unwrap(),
        );
        headers
    }

    #[test]
    fn valid_token_attaches_identity() {
        let auth = AuthService::new(SECRET, 0, None);
        let token = auth.issue_at("test", false, 1_700_000_000).unwrap();

        let ctx = authenticate(&headers_with(&format!("Bearer {token}")), &auth);

        assert_eq!(ctx, Some(AuthCtx::new("test", false, 1_700_000_000)));
    }

    #[test]
    fn no_header_is_anonymous() {
        let auth = AuthService::new(SECRET, 0, None);
        assert_eq!(authenticate(&HeaderMap::new(), &auth), None);
    }

    #[test]
    fn token_signed_with_other_secret_is_anonymous() {
        let auth = AuthService::new(SECRET, 0, None);
        let bad = AuthService::new(b"wrong", 0, None)
            .issue("test", false)
            .unwrap();

        assert_eq!(authenticate(&headers_with(&format!("Bearer {bad}")), &auth), None);
    }

    #[test]
    fn lowercase_scheme_and_padding_are_accepted() {
        let auth = AuthService::new(SECRET, 0, None);
        let token = auth.issue("test", true).unwrap();

        let ctx = authenticate(&headers_with(&format!("bearer {token}  ")), &auth).unwrap();

        assert!(ctx.is_admin);
    }

    #[test]
    fn other_schemes_are_anonymous() {
        let auth = AuthService::new(SECRET, 0, None);
        let token = auth.issue("test", false).unwrap();

        assert_eq!(authenticate(&headers_with(&format!("Basic {token}")), &auth), None);
        assert_eq!(authenticate(&headers_with(&token), &auth), None);
        assert_eq!(authenticate(&headers_with("Bearer "), &auth), None);
    }
}
