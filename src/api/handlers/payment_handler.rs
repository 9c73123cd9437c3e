//! Payment handlers.

use axum::{
    extract::{Extension, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::user_handler::EmailQuery;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Enrollment, NewPayment, Payment};
use crate::errors::AppResult;
use crate::types::Created;

/// Payment intent request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PaymentIntentRequest {
    /// Amount in major currency units
    #[validate(range(exclusive_min = 0.0, message = "Price must be positive"))]
    #[schema(example = 49.99)]
    pub price: f64,
}

/// Client secret of a created payment intent
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientSecretResponse {
    #[schema(example = "pi_3N_secret_abc")]
    pub client_secret: String,
}

/// Completed payment submitted by the client
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "student@example.com")]
    pub email: String,
    #[validate(range(exclusive_min = 0.0, message = "Amount must be positive"))]
    #[schema(example = 49.99)]
    pub amount: f64,
    pub course_id: Uuid,
    pub cart_item_id: Uuid,
    /// Provider transaction reference
    #[schema(example = "pi_3N")]
    pub transaction_id: Option<String>,
}

pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/payments", get(list_payments).post(record_payment))
}

/// Obtain a client secret for a card payment
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Intent created", body = ClientSecretResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Payment provider failure")
    )
)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PaymentIntentRequest>,
) -> AppResult<Json<ClientSecretResponse>> {
    let intent = state.payment_service.create_intent(payload.price).await?;
    Ok(Json(ClientSecretResponse {
        client_secret: intent.client_secret,
    }))
}

/// List the caller's payments
#[utoipa::path(
    get,
    path = "/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(EmailQuery),
    responses(
        (status = 200, description = "Payments, newest first", body = Vec<Payment>),
        (status = 403, description = "Email does not match the credential")
    )
)]
pub async fn list_payments(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> AppResult<Json<Vec<Payment>>> {
    let email = query.required()?;
    current_user.ensure_self(&email)?;

    let payments = state.payment_service.list_payments(&email).await?;
    Ok(Json(payments))
}

/// Record a payment and enroll the caller
#[utoipa::path(
    post,
    path = "/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = RecordPaymentRequest,
    responses(
        (status = 201, description = "Payment recorded and seat claimed", body = Enrollment),
        (status = 403, description = "Email does not match the credential"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "No seats left or course not approved")
    )
)]
pub async fn record_payment(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RecordPaymentRequest>,
) -> AppResult<Created<Enrollment>> {
    current_user.ensure_self(&payload.email)?;

    let enrollment = state
        .payment_service
        .record_payment(NewPayment {
            email: payload.email,
            amount: payload.amount,
            course_id: payload.course_id,
            cart_item_id: payload.cart_item_id,
            transaction_id: payload.transaction_id,
        })
        .await?;

    Ok(Created(enrollment))
}
