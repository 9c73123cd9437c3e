//! Credential issuance handler.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::TokenResponse;

/// Token request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    /// Email the credential is issued for
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "student@example.com")]
    pub email: String,
}

pub fn public_routes() -> Router<AppState> {
    Router::new().route("/jwt", post(issue_token))
}

/// Issue a signed bearer credential
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Authentication",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Credential issued", body = TokenResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn issue_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state.auth_service.issue_token(&payload.email)?;
    Ok(Json(token))
}
