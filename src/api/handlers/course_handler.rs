//! Course and feedback handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Course, CourseStatus, Feedback, NewCourse};
use crate::errors::AppResult;
use crate::types::Created;

/// Course submission
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Watercolor Basics")]
    pub title: String,
    pub image: Option<String>,
    #[validate(length(min = 1, message = "Instructor name is required"))]
    #[schema(example = "Ada Lovelace")]
    pub instructor_name: String,
    #[validate(email(message = "Invalid instructor email"))]
    #[schema(example = "ada@example.com")]
    pub instructor_email: String,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    #[schema(example = 49.99)]
    pub price: f64,
    #[validate(range(min = 0, message = "Seats must not be negative"))]
    #[schema(example = 20)]
    pub available_seats: i32,
}

/// Review status change
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: CourseStatus,
}

/// Review feedback
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FeedbackRequest {
    #[validate(length(min = 1, max = 2000, message = "Feedback must be 1-2000 characters"))]
    #[schema(example = "Please add a materials list.")]
    pub feedback: String,
}

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/:id", get(get_course))
        .route("/feedback", get(list_feedback))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/courses", post(create_course))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/courses/:id", patch(update_status).put(update_feedback))
}

/// List courses, most enrolled first
#[utoipa::path(
    get,
    path = "/courses",
    tag = "Courses",
    responses(
        (status = 200, description = "Courses by popularity", body = Vec<Course>)
    )
)]
pub async fn list_courses(State(state): State<AppState>) -> AppResult<Json<Vec<Course>>> {
    let courses = state.course_service.list_courses().await?;
    Ok(Json(courses))
}

/// Get a course
#[utoipa::path(
    get,
    path = "/courses/{id}",
    tag = "Courses",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course", body = Course),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Course>> {
    let course = state.course_service.get_course(id).await?;
    Ok(Json(course))
}

/// Submit a course for review (instructor or admin)
#[utoipa::path(
    post,
    path = "/courses",
    tag = "Courses",
    security(("bearer_auth" = [])),
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created as pending", body = Course),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Caller cannot publish for this instructor")
    )
)]
pub async fn create_course(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCourseRequest>,
) -> AppResult<Created<Course>> {
    let caller = state
        .auth_service
        .require_instructor(&current_user.email)
        .await?;
    // Instructors publish under their own email; admins may publish for anyone
    if !caller.is_admin() {
        current_user.ensure_self(&payload.instructor_email)?;
    }

    let course = state
        .course_service
        .create_course(NewCourse {
            title: payload.title,
            image: payload.image,
            instructor_name: payload.instructor_name,
            instructor_email: payload.instructor_email,
            price: payload.price,
            available_seats: payload.available_seats,
        })
        .await?;

    Ok(Created(course))
}

/// Set the review status (admin only)
#[utoipa::path(
    patch,
    path = "/courses/{id}",
    tag = "Courses",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated course", body = Course),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateStatusRequest>,
) -> AppResult<Json<Course>> {
    let course = state.course_service.set_status(id, payload.status).await?;
    Ok(Json(course))
}

/// Leave review feedback (admin only)
#[utoipa::path(
    put,
    path = "/courses/{id}",
    tag = "Courses",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Updated course", body = Course),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn update_feedback(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<FeedbackRequest>,
) -> AppResult<Json<Course>> {
    let course = state
        .course_service
        .set_feedback(id, current_user.email, payload.feedback)
        .await?;
    Ok(Json(course))
}

/// List review feedback, newest first
#[utoipa::path(
    get,
    path = "/feedback",
    tag = "Courses",
    responses(
        (status = 200, description = "Feedback log", body = Vec<Feedback>)
    )
)]
pub async fn list_feedback(State(state): State<AppState>) -> AppResult<Json<Vec<Feedback>>> {
    let feedback = state.course_service.list_feedback().await?;
    Ok(Json(feedback))
}
