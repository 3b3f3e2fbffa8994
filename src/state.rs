/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - db: PgPool, auth: AuthService (HS256 secret を注入済み)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, auth: Arc<AuthService>) -> Self {
        Self { db, auth }
    }
}
