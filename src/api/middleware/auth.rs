//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;

/// Caller identity taken from a verified token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub email: String,
}

impl CurrentUser {
    /// Fail with `Forbidden` unless `email` is the caller's own.
    pub fn ensure_self(&self, email: &str) -> Result<(), AppError> {
        if self.email == email {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentUser into the request extensions. Nothing
/// downstream runs for a missing, malformed or expired token.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    request.extensions_mut().insert(CurrentUser {
        email: claims.email,
    });

    Ok(next.run(request).await)
}

/// Admin gate. Must run after `auth_middleware`.
pub async fn admin_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let current_user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;

    state.auth_service.require_admin(&current_user.email).await?;

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_self() {
        let caller = CurrentUser {
            email: "a@x.com".to_string(),
        };

        assert!(caller.ensure_self("a@x.com").is_ok());
        assert!(matches!(caller.ensure_self("b@y.com"), Err(AppError::Forbidden)));
    }
}
