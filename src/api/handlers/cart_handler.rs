//! Cart handlers. Every route is scoped to the caller's own items.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::user_handler::EmailQuery;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::CartItem;
use crate::errors::AppResult;
use crate::types::{Created, DeleteResult};

/// Add-to-cart request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "student@example.com")]
    pub email: String,
    pub course_id: Uuid,
}

pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/carts", get(list_cart).post(add_to_cart))
        .route("/carts/:id", get(get_cart_item).delete(remove_cart_item))
}

/// List the caller's cart
#[utoipa::path(
    get,
    path = "/carts",
    tag = "Carts",
    security(("bearer_auth" = [])),
    params(EmailQuery),
    responses(
        (status = 200, description = "Cart items", body = Vec<CartItem>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Email does not match the credential")
    )
)]
pub async fn list_cart(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> AppResult<Json<Vec<CartItem>>> {
    let email = query.required()?;
    current_user.ensure_self(&email)?;

    let items = state.cart_service.list_items(&email).await?;
    Ok(Json(items))
}

/// Add a course to the caller's cart
#[utoipa::path(
    post,
    path = "/carts",
    tag = "Carts",
    security(("bearer_auth" = [])),
    request_body = AddCartItemRequest,
    responses(
        (status = 201, description = "Item added", body = CartItem),
        (status = 403, description = "Email does not match the credential"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn add_to_cart(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddCartItemRequest>,
) -> AppResult<Created<CartItem>> {
    current_user.ensure_self(&payload.email)?;

    let item = state
        .cart_service
        .add_item(payload.email, payload.course_id)
        .await?;
    Ok(Created(item))
}

/// Get one of the caller's cart items
#[utoipa::path(
    get,
    path = "/carts/{id}",
    tag = "Carts",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Cart item ID")
    ),
    responses(
        (status = 200, description = "Cart item", body = CartItem),
        (status = 403, description = "Item belongs to another user"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_cart_item(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CartItem>> {
    let item = state.cart_service.get_item(id, &current_user.email).await?;
    Ok(Json(item))
}

/// Remove one of the caller's cart items
#[utoipa::path(
    delete,
    path = "/carts/{id}",
    tag = "Carts",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Cart item ID")
    ),
    responses(
        (status = 200, description = "Deletion outcome", body = DeleteResult),
        (status = 403, description = "Item belongs to another user"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn remove_cart_item(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DeleteResult>> {
    let deleted = state
        .cart_service
        .remove_item(id, &current_user.email)
        .await?;
    Ok(Json(DeleteResult::new(deleted)))
}
