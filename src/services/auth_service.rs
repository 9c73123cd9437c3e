//! Authentication service - Credential issuance and caller resolution.
//!
//! Tokens carry only the caller's email. Role checks always go back to the
//! user store, so a role change takes effect on the next request.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Token response returned by `/jwt`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Signed bearer token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Sign a credential for `email`
    fn issue_token(&self, email: &str) -> AppResult<TokenResponse>;

    /// Verify signature and expiry, returning the claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Load the user behind a verified credential
    async fn resolve_user(&self, email: &str) -> AppResult<User>;

    /// Fail with `Forbidden` unless the caller is an admin
    async fn require_admin(&self, email: &str) -> AppResult<User>;

    /// Fail with `Forbidden` unless the caller may publish courses
    async fn require_instructor(&self, email: &str) -> AppResult<User>;
}

fn sign_claims(claims: &Claims, config: &Config) -> AppResult<String> {
    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;
    Ok(token)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    fn issue_token(&self, email: &str) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.jwt_expiration_hours);

        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        Ok(TokenResponse {
            token: sign_claims(&claims, &self.config)?,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.config.jwt_expiration_hours * SECONDS_PER_HOUR,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    async fn resolve_user(&self, email: &str) -> AppResult<User> {
        self.uow
            .users()
            .find_by_email(email)
            .await?
            .ok_or(AppError::Forbidden)
    }

    async fn require_admin(&self, email: &str) -> AppResult<User> {
        let user = self.resolve_user(email).await?;
        if !user.is_admin() {
            tracing::debug!(email = %email, role = %user.role, "Admin check failed");
            return Err(AppError::Forbidden);
        }
        Ok(user)
    }

    async fn require_instructor(&self, email: &str) -> AppResult<User> {
        let user = self.resolve_user(email).await?;
        if !user.role.can_teach() {
            return Err(AppError::Forbidden);
        }
        Ok(user)
    }
}
