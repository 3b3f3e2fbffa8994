/*
 * Responsibility
 * - Handler / guard から見える「認証済みコンテキスト」の型
 * - authenticate middleware が検証して request extensions に格納する (1 リクエストにつき高々 1 つ)
 *
 * Notes
 * - JWT の検証ロジックは services/auth 側の責務
 * - 認可 (admin / 本人) の判定は services/auth/policy 側の責務
 */
use serde::Serialize;

use crate::services::auth::Claims;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `username` はリソース所有者との照合に使う (大文字小文字を区別した完全一致)
/// - `is_admin` は特権フラグ
/// - `issued_at` はトークン発行時刻 (unix seconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthCtx {
    pub username: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    #[serde(rename = "iat")]
    pub issued_at: i64,
}

impl AuthCtx {
    pub fn new(username: impl Into<String>, is_admin: bool, issued_at: i64) -> Self {
        Self {
            username: username.into(),
            is_admin,
            issued_at,
        }
    }
}

impl From<Claims> for AuthCtx {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.username,
            is_admin: claims.is_admin,
            issued_at: claims.issued_at,
        }
    }
}
