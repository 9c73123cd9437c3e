//! Integration tests for API endpoints.
//!
//! Requests go through the full router, middleware included, backed by an
//! in-memory store and a payment gateway that approves everything.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use artistry_api::domain::CourseStatus;
use artistry_api::UserRole;
use common::{error_code, TestContext};

// =============================================================================
// Public endpoints
// =============================================================================

#[tokio::test]
async fn test_health_reports_store() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_jwt_issues_bearer_token() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .send(Method::POST, "/jwt", None, Some(json!({ "email": "a@x.com" })))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokenType"], "Bearer");
    let token = body["token"].as_str().unwrap();
    assert_eq!(ctx.auth_email(token), "a@x.com");
}

#[tokio::test]
async fn test_user_lookup_requires_email() {
    let ctx = TestContext::new().await;
    ctx.seed_user("a@x.com", UserRole::Student).await;

    let (status, body) = ctx.send(Method::GET, "/user?email=a@x.com", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "student");

    let (status, body) = ctx.send(Method::GET, "/user", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");

    let (status, _) = ctx.send(Method::GET, "/user?email=ghost@x.com", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_courses_listed_most_enrolled_first() {
    let ctx = TestContext::new().await;
    ctx.seed_course(8, 1).await;
    ctx.seed_course(2, 30).await;

    let (status, body) = ctx.send(Method::GET, "/courses", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let courses = body.as_array().unwrap();
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0]["enrolledStudents"], 30);
    assert_eq!(courses[1]["enrolledStudents"], 1);
}

// =============================================================================
// Credential checks
// =============================================================================

#[tokio::test]
async fn test_missing_credential_is_unauthorized() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.send(Method::GET, "/carts?email=a@x.com", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_expired_credential_has_no_side_effects() {
    let ctx = TestContext::new().await;
    let course = ctx.seed_course(5, 0).await;
    let token = ctx.expired_token("a@x.com");

    let (status, _) = ctx
        .send(
            Method::POST,
            "/carts",
            Some(&token),
            Some(json!({ "email": "a@x.com", "courseId": course.id })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(ctx.cart_items("a@x.com").await.is_empty());
}

#[tokio::test]
async fn test_cart_of_another_user_is_forbidden() {
    let ctx = TestContext::new().await;
    let course = ctx.seed_course(5, 0).await;
    ctx.seed_cart_item("a@x.com", &course).await;
    let token = ctx.token("b@x.com");

    let (status, body) = ctx
        .send(Method::GET, "/carts?email=a@x.com", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "FORBIDDEN");
}

#[tokio::test]
async fn test_user_listing_is_admin_only() {
    let ctx = TestContext::new().await;
    ctx.seed_user("s@x.com", UserRole::Student).await;
    ctx.seed_user("root@x.com", UserRole::Admin).await;

    let (status, _) = ctx
        .send(Method::GET, "/users", Some(&ctx.token("s@x.com")), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = ctx
        .send(Method::GET, "/users", Some(&ctx.token("root@x.com")), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

// =============================================================================
// Users and roles
// =============================================================================

#[tokio::test]
async fn test_signup_twice_is_conflict() {
    let ctx = TestContext::new().await;
    let token = ctx.token("grace@x.com");
    let signup = json!({ "email": "grace@x.com", "name": "Grace" });

    let (status, body) = ctx
        .send(Method::POST, "/users", Some(&token), Some(signup.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "student");

    let (status, body) = ctx
        .send(Method::POST, "/users", Some(&token), Some(signup))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "CONFLICT");
}

#[tokio::test]
async fn test_signup_for_someone_else_is_forbidden() {
    let ctx = TestContext::new().await;

    let (status, _) = ctx
        .send(
            Method::POST,
            "/users",
            Some(&ctx.token("mallory@x.com")),
            Some(json!({ "email": "grace@x.com", "name": "Grace" })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_promotes_instructor() {
    let ctx = TestContext::new().await;
    ctx.seed_user("root@x.com", UserRole::Admin).await;
    let user = ctx.seed_user("ada@x.com", UserRole::Student).await;

    let (status, body) = ctx
        .send(
            Method::PATCH,
            &format!("/users/{}", user.id),
            Some(&ctx.token("root@x.com")),
            Some(json!({ "role": "instructor" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "instructor");
    assert_eq!(body["instructorUpsert"], "created");

    let (status, body) = ctx
        .send(Method::GET, &format!("/instructors/{}", user.id), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ada@x.com");
}

// =============================================================================
// Courses
// =============================================================================

#[tokio::test]
async fn test_student_cannot_submit_course() {
    let ctx = TestContext::new().await;
    ctx.seed_user("s@x.com", UserRole::Student).await;

    let (status, _) = ctx
        .send(
            Method::POST,
            "/courses",
            Some(&ctx.token("s@x.com")),
            Some(json!({
                "title": "Ink Drawing",
                "instructorName": "S",
                "instructorEmail": "s@x.com",
                "price": 20.0,
                "availableSeats": 10
            })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_instructor_submits_pending_course() {
    let ctx = TestContext::new().await;
    ctx.seed_user("ada@x.com", UserRole::Instructor).await;

    let (status, body) = ctx
        .send(
            Method::POST,
            "/courses",
            Some(&ctx.token("ada@x.com")),
            Some(json!({
                "title": "Ink Drawing",
                "instructorName": "Ada",
                "instructorEmail": "ada@x.com",
                "price": 20.0,
                "availableSeats": 10
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["enrolledStudents"], 0);
}

#[tokio::test]
async fn test_admin_feedback_is_logged() {
    let ctx = TestContext::new().await;
    ctx.seed_user("root@x.com", UserRole::Admin).await;
    let course = ctx.seed_course(5, 0).await;

    let (status, body) = ctx
        .send(
            Method::PUT,
            &format!("/courses/{}", course.id),
            Some(&ctx.token("root@x.com")),
            Some(json!({ "feedback": "Please add a materials list." })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["feedback"], "Please add a materials list.");

    let (status, body) = ctx.send(Method::GET, "/feedback", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["authorEmail"], "root@x.com");
}

// =============================================================================
// Payments
// =============================================================================

#[tokio::test]
async fn test_payment_intent_returns_client_secret() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .send(
            Method::POST,
            "/create-payment-intent",
            Some(&ctx.token("a@x.com")),
            Some(json!({ "price": 49.99 })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clientSecret"], "pi_4999_usd_secret");
}

#[tokio::test]
async fn test_payment_intent_rejects_zero_price() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .send(
            Method::POST,
            "/create-payment-intent",
            Some(&ctx.token("a@x.com")),
            Some(json!({ "price": 0 })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_recorded_payment_enrolls_caller() {
    let ctx = TestContext::new().await;
    let course = ctx.seed_course(5, 10).await;
    let item = ctx.seed_cart_item("a@x.com", &course).await;
    let token = ctx.token("a@x.com");

    let (status, body) = ctx
        .send(
            Method::POST,
            "/payments",
            Some(&token),
            Some(json!({
                "email": "a@x.com",
                "amount": 49.99,
                "courseId": course.id,
                "cartItemId": item.id,
                "transactionId": "pi_4999"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["seats"]["availableSeats"], 4);
    assert_eq!(body["seats"]["enrolledStudents"], 11);
    assert_eq!(body["cartItemRemoved"], true);

    let (status, body) = ctx
        .send(Method::GET, "/payments?email=a@x.com", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_payment_for_full_course_is_conflict() {
    let ctx = TestContext::new().await;
    let course = ctx.seed_course(0, 3).await;
    let item = ctx.seed_cart_item("a@x.com", &course).await;

    let (status, body) = ctx
        .send(
            Method::POST,
            "/payments",
            Some(&ctx.token("a@x.com")),
            Some(json!({
                "email": "a@x.com",
                "amount": 49.99,
                "courseId": course.id,
                "cartItemId": item.id
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "SEATS_EXHAUSTED");
    assert_eq!(ctx.payment_count("a@x.com").await, 0);
}

#[tokio::test]
async fn test_payment_for_pending_course_is_conflict() {
    let ctx = TestContext::new().await;
    let course = ctx
        .seed_course_with_status(5, 0, CourseStatus::Pending)
        .await;
    let item = ctx.seed_cart_item("a@x.com", &course).await;

    let (status, body) = ctx
        .send(
            Method::POST,
            "/payments",
            Some(&ctx.token("a@x.com")),
            Some(json!({
                "email": "a@x.com",
                "amount": 49.99,
                "courseId": course.id,
                "cartItemId": item.id
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "COURSE_NOT_OPEN");
    assert_eq!(ctx.cart_items("a@x.com").await.len(), 1);
}
