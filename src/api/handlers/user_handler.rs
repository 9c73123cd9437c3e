//! User handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{NewUser, RoleTransition, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, DeleteResult};

/// Owner email query parameter
#[derive(Debug, Deserialize, IntoParams)]
pub struct EmailQuery {
    /// Email of the record owner
    pub email: Option<String>,
}

impl EmailQuery {
    pub fn required(self) -> AppResult<String> {
        self.email
            .filter(|email| !email.is_empty())
            .ok_or_else(|| AppError::bad_request("email query parameter is required"))
    }
}

/// Signup request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "student@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// Avatar URL
    pub image: Option<String>,
}

/// Role change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleRequest {
    pub role: UserRole,
}

pub fn public_routes() -> Router<AppState> {
    Router::new().route("/user", get(get_user_by_email))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/users", post(create_user))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", patch(update_role).delete(delete_user))
}

/// List all users (admin only)
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of all users", body = Vec<User>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}

/// Get a user by email
#[utoipa::path(
    get,
    path = "/user",
    tag = "Users",
    params(EmailQuery),
    responses(
        (status = 200, description = "User profile", body = User),
        (status = 400, description = "Missing email"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> AppResult<Json<User>> {
    let email = query.required()?;
    let user = state.user_service.find_by_email(&email).await?;
    Ok(Json(user))
}

/// Sign up the caller
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Email does not match the credential"),
        (status = 409, description = "User already exists")
    )
)]
pub async fn create_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<User>> {
    current_user.ensure_self(&payload.email)?;

    let user = state
        .user_service
        .create_user(NewUser {
            email: payload.email,
            name: payload.name,
            image: payload.image,
        })
        .await?;

    Ok(Created(user))
}

/// Change a user's role (admin only)
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role changed and roster updated", body = RoleTransition),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateRoleRequest>,
) -> AppResult<Json<RoleTransition>> {
    let transition = state.user_service.set_role(id, payload.role).await?;
    Ok(Json(transition))
}

/// Delete a user (admin only)
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Deletion outcome", body = DeleteResult),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DeleteResult>> {
    let deleted = state.user_service.delete_user(id).await?;
    Ok(Json(DeleteResult::new(deleted)))
}
