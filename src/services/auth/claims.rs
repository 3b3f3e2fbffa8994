use serde::{Deserialize, Serialize};

/// Payload carried by a bearer token.
///
/// - `iat` is always present; tokens minted by [`super::AuthService`] stamp it.
/// - `exp` is optional. Tokens without it never expire, tokens with it are checked
///   by `jsonwebtoken::Validation` (with leeway).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    #[serde(rename = "iat")]
    pub issued_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}
