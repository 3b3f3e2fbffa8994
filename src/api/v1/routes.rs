/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 認可 guard は route_layer でルート単位に掛ける (routing 後に走るので Path を読める)
 * - 認証 (AuthCtx の付与) は app.rs で v1 全体に掛ける
 */
use axum::{Router, middleware::from_fn, routing::get};

use crate::api::v1::handlers::{
    auth::me,
    health::health,
    users::{delete_user, get_user, list_users, update_user},
};
use crate::middleware::auth::guards::{require_admin, require_logged_in, require_user_or_admin};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/me", get(me).route_layer(from_fn(require_logged_in)))
        .route("/users", get(list_users).route_layer(from_fn(require_admin)))
        .route(
            "/users/{username}",
            get(get_user)
                .patch(update_user)
                .delete(delete_user)
                .route_layer(from_fn(require_user_or_admin)),
        )
}
