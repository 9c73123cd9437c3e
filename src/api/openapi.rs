//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    cart_handler, course_handler, instructor_handler, jwt_handler, payment_handler, user_handler,
};
use crate::domain::{
    CartItem, Course, CourseStatus, Enrollment, Feedback, Instructor, Payment, RoleTransition,
    RosterUpsert, SeatCounts, User, UserRole,
};
use crate::services::TokenResponse;
use crate::types::DeleteResult;

/// OpenAPI documentation for the course marketplace API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Artistry API",
        version = "0.1.0",
        description = "Course marketplace backend: users, courses, carts, instructors, feedback and payments",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        jwt_handler::issue_token,
        user_handler::list_users,
        user_handler::get_user_by_email,
        user_handler::create_user,
        user_handler::update_role,
        user_handler::delete_user,
        instructor_handler::list_instructors,
        instructor_handler::get_instructor,
        course_handler::list_courses,
        course_handler::get_course,
        course_handler::create_course,
        course_handler::update_status,
        course_handler::update_feedback,
        course_handler::list_feedback,
        cart_handler::list_cart,
        cart_handler::add_to_cart,
        cart_handler::get_cart_item,
        cart_handler::remove_cart_item,
        payment_handler::create_payment_intent,
        payment_handler::list_payments,
        payment_handler::record_payment,
    ),
    components(
        schemas(
            // Domain types
            User,
            UserRole,
            RoleTransition,
            RosterUpsert,
            Instructor,
            Course,
            CourseStatus,
            SeatCounts,
            Feedback,
            CartItem,
            Payment,
            Enrollment,
            // Shared types
            DeleteResult,
            TokenResponse,
            // Request and response bodies
            jwt_handler::TokenRequest,
            user_handler::CreateUserRequest,
            user_handler::UpdateRoleRequest,
            course_handler::CreateCourseRequest,
            course_handler::UpdateStatusRequest,
            course_handler::FeedbackRequest,
            cart_handler::AddCartItemRequest,
            payment_handler::PaymentIntentRequest,
            payment_handler::ClientSecretResponse,
            payment_handler::RecordPaymentRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Credential issuance"),
        (name = "Users", description = "Accounts and role management"),
        (name = "Instructors", description = "Instructor roster"),
        (name = "Courses", description = "Course catalog and review"),
        (name = "Carts", description = "Shopping carts"),
        (name = "Payments", description = "Payment intents and enrollment")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Credential obtained from /jwt"))
                        .build(),
                ),
            );
        }
    }
}
