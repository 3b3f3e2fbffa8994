use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::services::auth::claims::Claims;

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
    #[error("token lifetime of {ttl_seconds}s from iat {issued_at} is out of range")]
    ExpiryOutOfRange { issued_at: i64, ttl_seconds: u64 },
}

/// `iat + ttl`, or `None` when the sum does not fit an `i64` timestamp.
pub fn expiry_for(issued_at: i64, ttl_seconds: u64) -> Option<i64> {
    i64::try_from(ttl_seconds)
        .ok()
        .and_then(|ttl| issued_at.checked_add(ttl))
}

/// HS256 access-token service backed by a single shared secret.
///
/// - Key material is intentionally not printable via Debug.
/// - Immutable after construction; share it as `Arc<AuthService>`.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: Option<u64>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &[u8], leeway_seconds: u64, ttl_seconds: Option<u64>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens without `exp` are accepted; `exp` is still validated when present.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.leeway = leeway_seconds;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_seconds,
        }
    }

    /// Verify signature (+ `exp` when present) and decode the claims.
    ///
    /// Fails for a wrong secret, a malformed token, a payload missing
    /// `username`/`isAdmin`/`iat`, an empty username or an expired token.
    pub fn verify(&self, token: &str) -> Result<Claims, AccessJwtError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.username.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("username"));
        }

        Ok(claims)
    }

    /// Mint a token stamped with the current time.
    pub fn issue(&self, username: &str, is_admin: bool) -> Result<String, AccessJwtError> {
        self.issue_at(username, is_admin, chrono::Utc::now().timestamp())
    }

    /// Mint a token with an explicit `iat` (unix seconds).
    pub fn issue_at(
        &self,
        username: &str,
        is_admin: bool,
        issued_at: i64,
    ) -> Result<String, AccessJwtError> {
        let exp = match self.ttl_seconds {
            Some(ttl_seconds) => Some(expiry_for(issued_at, ttl_seconds).ok_or(
                AccessJwtError::ExpiryOutOfRange {
                    issued_at,
                    ttl_seconds,
                },
            )?),
            None => None,
        };

        let claims = Claims {
            username: username.to_string(),
            is_admin,
            issued_at,
            exp,
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        let token = jsonwebtoken::encode(&header, &claims, &self.encoding_key)?;

        Ok(token)
    }
}
