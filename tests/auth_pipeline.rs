//! End-to-end checks of the two-phase pipeline: `authenticate` attaches an identity
//! (never rejecting), then per-route guards decide.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    middleware::from_fn,
    routing::get,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use jobly_api::api::v1::extractors::MaybeAuthCtx;
use jobly_api::middleware::auth::{
    authenticate,
    guards::{require_admin, require_logged_in, require_user_or_admin},
};
use jobly_api::services::auth::AuthService;

const SECRET: &[u8] = b"test-secret";

async fn whoami(MaybeAuthCtx(ctx): MaybeAuthCtx) -> Json<Value> {
    match ctx {
        Some(ctx) => Json(json!({ "username": ctx.username, "isAdmin": ctx.is_admin })),
        None => Json(json!(null)),
    }
}

async fn ok() -> &'static str {
    "ok"
}

fn app() -> Router {
    let router = Router::new()
        .route("/whoami", get(whoami))
        .route("/me", get(ok).route_layer(from_fn(require_logged_in)))
        .route("/admin", get(ok).route_layer(from_fn(require_admin)))
        .route(
            "/users/{username}",
            get(ok).route_layer(from_fn(require_user_or_admin)),
        );

    authenticate::apply(router, Arc::new(AuthService::new(SECRET, 0, None)))
}

fn token(username: &str, is_admin: bool) -> String {
    AuthService::new(SECRET, 0, None)
        .issue(username, is_admin)
        .unwrap()
}

async fn call(uri: &str, bearer: Option<&str>) -> (StatusCode, Value) {
    let mut req = Request::builder().uri(uri);
    if let Some(bearer) = bearer {
        req = req.header(header::AUTHORIZATION, format!("Bearer {bearer}"));
    }

    let res = app()
        .oneshot(req.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::String(
        String::from_utf8_lossy(&bytes).into_owned(),
    ));

    (status, body)
}

#[tokio::test]
async fn valid_token_is_attached() {
    let (status, body) = call("/whoami", Some(&token("test", false))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "username": "test", "isAdmin": false }));
}

#[tokio::test]
async fn missing_header_continues_unauthenticated() {
    let (status, body) = call("/whoami", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn bad_signature_continues_unauthenticated() {
    let forged = AuthService::new(b"wrong", 0, None)
        .issue("test", true)
        .unwrap();

    let (status, body) = call("/whoami", Some(&forged)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn logged_in_guard() {
    assert_eq!(call("/me", Some(&token("test", false))).await.0, StatusCode::OK);

    let (status, body) = call("/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn admin_guard() {
    assert_eq!(call("/admin", Some(&token("root", true))).await.0, StatusCode::OK);
    assert_eq!(
        call("/admin", Some(&token("regularUser", false))).await.0,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(call("/admin", None).await.0, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_or_admin_guard() {
    // admin bypasses the ownership check
    assert_eq!(
        call("/users/someoneElse", Some(&token("adminUser", true))).await.0,
        StatusCode::OK
    );
    // owner
    assert_eq!(
        call("/users/resourceOwner", Some(&token("resourceOwner", false))).await.0,
        StatusCode::OK
    );
    // somebody else
    assert_eq!(
        call("/users/otherUser", Some(&token("resourceOwner", false))).await.0,
        StatusCode::UNAUTHORIZED
    );
    // case matters
    assert_eq!(
        call("/users/ResourceOwner", Some(&token("resourceOwner", false))).await.0,
        StatusCode::UNAUTHORIZED
    );
    // anonymous
    assert_eq!(
        call("/users/resourceOwner", None).await.0,
        StatusCode::UNAUTHORIZED
    );
}
