//! Authorization decisions over the attached `AuthCtx`.
//!
//! Each policy is a pure function: no state, no I/O, every call independent.
//! All rejections share one error so a caller cannot tell "not logged in"
//! apart from "logged in but not allowed".

use thiserror::Error;

use crate::api::v1::extractors::AuthCtx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthzError {
    #[error("unauthorized")]
    Unauthorized,
}

/// Any authenticated identity.
pub fn ensure_logged_in(ctx: Option<&AuthCtx>) -> Result<&AuthCtx, AuthzError> {
    ctx.ok_or(AuthzError::Unauthorized)
}

/// Authenticated and `is_admin`.
pub fn ensure_admin(ctx: Option<&AuthCtx>) -> Result<&AuthCtx, AuthzError> {
    match ctx {
        Some(ctx) if ctx.is_admin => Ok(ctx),
        _ => Err(AuthzError::Unauthorized),
    }
}

/// Authenticated and either `is_admin` or the owner of `username`.
///
/// Ownership is exact, case-sensitive string equality.
pub fn ensure_correct_user_or_admin<'a>(
    ctx: Option<&'a AuthCtx>,
    username: &str,
) -> Result<&'a AuthCtx, AuthzError> {
    match ctx {
        Some(ctx) if ctx.is_admin || ctx.username == username => Ok(ctx),
        _ => Err(AuthzError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str) -> AuthCtx {
        AuthCtx::new(username, false, 0)
    }

    fn admin(username: &str) -> AuthCtx {
        AuthCtx::new(username, true, 0)
    }

    #[test]
    fn logged_in_accepts_any_identity() {
        assert!(ensure_logged_in(Some(&user("test"))).is_ok());
        assert!(ensure_logged_in(Some(&admin("root"))).is_ok());
    }

    #[test]
    fn logged_in_rejects_anonymous() {
        assert_eq!(ensure_logged_in(None), Err(AuthzError::Unauthorized));
    }

    #[test]
    fn admin_accepts_admin() {
        let ctx = admin("adminUser");
        assert_eq!(ensure_admin(Some(&ctx)), Ok(&ctx));
    }

    #[test]
    fn admin_rejects_regular_user_and_anonymous_alike() {
        let regular = ensure_admin(Some(&user("regularUser"))).unwrap_err();
        let anonymous = ensure_admin(None).unwrap_err();

        assert_eq!(regular, anonymous);
    }

    #[test]
    fn user_or_admin_lets_admin_bypass_ownership() {
        let ctx = admin("adminUser");
        assert!(ensure_correct_user_or_admin(Some(&ctx), "adminUser").is_ok());
        assert!(ensure_correct_user_or_admin(Some(&ctx), "someoneElse").is_ok());
    }

    #[test]
    fn user_or_admin_accepts_owner() {
        let ctx = user("resourceOwner");
        assert!(ensure_correct_user_or_admin(Some(&ctx), "resourceOwner").is_ok());
    }

    #[test]
    fn user_or_admin_rejects_other_user() {
        let ctx = user("resourceOwner");
        assert_eq!(
            ensure_correct_user_or_admin(Some(&ctx), "otherUser"),
            Err(AuthzError::Unauthorized)
        );
    }

    #[test]
    fn user_or_admin_ownership_is_case_sensitive() {
        let ctx = user("resourceOwner");
        assert!(ensure_correct_user_or_admin(Some(&ctx), "ResourceOwner").is_err());
        assert!(ensure_correct_user_or_admin(Some(&ctx), "resourceOwner ").is_err());
    }

    #[test]
    fn user_or_admin_rejects_anonymous() {
        assert!(ensure_correct_user_or_admin(None, "resourceOwner").is_err());
        assert!(ensure_correct_user_or_admin(None, "").is_err());
    }
}
