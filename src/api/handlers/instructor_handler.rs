//! Instructor roster handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::domain::Instructor;
use crate::errors::AppResult;

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/instructors", get(list_instructors))
        .route("/instructors/:id", get(get_instructor))
}

/// List the instructor roster
#[utoipa::path(
    get,
    path = "/instructors",
    tag = "Instructors",
    responses(
        (status = 200, description = "Instructor roster", body = Vec<Instructor>)
    )
)]
pub async fn list_instructors(State(state): State<AppState>) -> AppResult<Json<Vec<Instructor>>> {
    let instructors = state.user_service.list_instructors().await?;
    Ok(Json(instructors))
}

/// Get the roster record of a user
#[utoipa::path(
    get,
    path = "/instructors/{id}",
    tag = "Instructors",
    params(
        ("id" = Uuid, Path, description = "Id of the instructor's user account")
    ),
    responses(
        (status = 200, description = "Roster record", body = Instructor),
        (status = 404, description = "User is not an instructor")
    )
)]
pub async fn get_instructor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Instructor>> {
    let instructor = state.user_service.get_instructor(id).await?;
    Ok(Json(instructor))
}
