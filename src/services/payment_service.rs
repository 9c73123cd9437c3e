//! Payment service - Charge intents and enrollment reconciliation.
//!
//! Recording a payment is all-or-nothing: the payment row, the seat claim
//! and the cart cleanup share one transaction. Only approved courses take
//! enrollments. Seats are claimed with a conditional update so two buyers
//! can never take the last seat twice.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{to_minor_units, Enrollment, NewPayment, Payment, PaymentIntent};
use crate::errors::{AppError, AppResult};
use crate::infra::{PaymentGateway, TransactionContext, UnitOfWork};
use crate::with_transaction;

/// Payment service trait for dependency injection.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Ask the provider for a card payment intent of `amount` major units
    async fn create_intent(&self, amount: f64) -> AppResult<PaymentIntent>;

    /// Record a completed payment and enroll the buyer
    async fn record_payment(&self, payment: NewPayment) -> AppResult<Enrollment>;

    /// List the payments of `email`, newest first
    async fn list_payments(&self, email: &str) -> AppResult<Vec<Payment>>;
}

/// Concrete implementation of PaymentService using Unit of Work.
pub struct PaymentProcessor<U: UnitOfWork> {
    uow: Arc<U>,
    gateway: Arc<dyn PaymentGateway>,
    currency: String,
}

impl<U: UnitOfWork> PaymentProcessor<U> {
    pub fn new(uow: Arc<U>, gateway: Arc<dyn PaymentGateway>, currency: impl Into<String>) -> Self {
        Self {
            uow,
            gateway,
            currency: currency.into(),
        }
    }
}

async fn reconcile(ctx: TransactionContext<'_>, new_payment: NewPayment) -> AppResult<Enrollment> {
    let course_id = new_payment.course_id;
    let cart_item_id = new_payment.cart_item_id;
    let email = new_payment.email.clone();

    let payment = ctx.payments().create(new_payment).await?;

    let course = ctx
        .courses()
        .find_by_id(course_id)
        .await?
        .ok_or(AppError::CourseNotFound(course_id))?;
    if !course.is_open_for_enrollment() {
        return Err(AppError::CourseNotOpen(course_id));
    }

    if !ctx.courses().claim_seat(course_id).await? {
        return Err(AppError::SeatsExhausted(course_id));
    }

    let seats = ctx
        .courses()
        .find_by_id(course_id)
        .await?
        .ok_or(AppError::CourseNotFound(course_id))?
        .seats();

    let removed = ctx
        .carts()
        .delete_paid(cart_item_id, &email, course_id)
        .await?;

    Ok(Enrollment {
        payment,
        seats,
        cart_item_removed: removed > 0,
    })
}

#[async_trait]
impl<U: UnitOfWork> PaymentService for PaymentProcessor<U> {
    async fn create_intent(&self, amount: f64) -> AppResult<PaymentIntent> {
        let amount_minor = to_minor_units(amount)?;
        let intent = self
            .gateway
            .create_payment_intent(amount_minor, &self.currency)
            .await?;

        tracing::info!(intent_id = %intent.id, amount_minor, currency = %self.currency, "Payment intent created");
        Ok(intent)
    }

    async fn record_payment(&self, payment: NewPayment) -> AppResult<Enrollment> {
        let course_id = payment.course_id;
        let email = payment.email.clone();

        let result = with_transaction!(self.uow, |ctx| reconcile(ctx, payment).await);

        match &result {
            Ok(enrollment) => tracing::info!(
                payment_id = %enrollment.payment.id,
                course_id = %course_id,
                email = %email,
                available_seats = enrollment.seats.available_seats,
                enrolled_students = enrollment.seats.enrolled_students,
                capacity = enrollment.seats.capacity(),
                cart_item_removed = enrollment.cart_item_removed,
                "Enrollment reconciled"
            ),
            Err(e) => tracing::warn!(
                course_id = %course_id,
                email = %email,
                error = %e,
                "Payment rolled back"
            ),
        }

        result
    }

    async fn list_payments(&self, email: &str) -> AppResult<Vec<Payment>> {
        self.uow.payments().list_by_email(email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockPaymentGateway, MockPaymentRepository};
    use crate::services::test_support::TestUnitOfWork;
    use mockall::predicate::eq;

    fn processor(gateway: MockPaymentGateway) -> PaymentProcessor<TestUnitOfWork> {
        PaymentProcessor::new(Arc::new(TestUnitOfWork::default()), Arc::new(gateway), "usd")
    }

    #[tokio::test]
    async fn test_create_intent_converts_to_minor_units() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_payment_intent()
            .withf(|amount, currency| *amount == 4999 && currency == "usd")
            .times(1)
            .returning(|_, _| {
                Ok(PaymentIntent {
                    id: "pi_123".to_string(),
                    client_secret: "pi_123_secret_abc".to_string(),
                })
            });

        let intent = processor(gateway).create_intent(49.99).await.unwrap();
        assert_eq!(intent.client_secret, "pi_123_secret_abc");
    }

    #[tokio::test]
    async fn test_create_intent_rejects_non_positive_amount() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_create_payment_intent().never();

        let result = processor(gateway).create_intent(0.0).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_provider_failure_is_upstream_payment_error() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_payment_intent()
            .returning(|_, _| Err(AppError::payment("card_declined")));

        let result = processor(gateway).create_intent(10.0).await;
        assert!(matches!(result, Err(AppError::Payment(_))));
    }

    #[tokio::test]
    async fn test_list_payments_scoped_by_email() {
        let mut payments = MockPaymentRepository::new();
        payments
            .expect_list_by_email()
            .with(eq("a@x.com"))
            .returning(|_| Ok(vec![]));

        let uow = TestUnitOfWork::default().with_payments(payments);
        let service = PaymentProcessor::new(Arc::new(uow), Arc::new(MockPaymentGateway::new()), "usd");

        assert!(service.list_payments("a@x.com").await.unwrap().is_empty());
    }
}
