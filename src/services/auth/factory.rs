/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::AuthService;

pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    let auth = AuthService::new(
        config.secret_key.as_bytes(),
        config.access_token_leeway_seconds,
        config.access_token_ttl_seconds,
    );

    tracing::debug!(auth = ?auth, "auth service ready");

    Arc::new(auth)
}
