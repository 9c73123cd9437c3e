//! Payment repository implementation.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::domain::{NewPayment, Payment};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Payment repository trait. Records are append-only.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// List payments made by `email`, newest first
    async fn list_by_email(&self, email: &str) -> AppResult<Vec<Payment>>;

    /// Record a payment
    async fn create(&self, payment: NewPayment) -> AppResult<Payment>;
}

/// Concrete implementation of PaymentRepository
pub struct PaymentStore {
    db: DatabaseConnection,
}

impl PaymentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for PaymentStore {
    async fn list_by_email(&self, email: &str) -> AppResult<Vec<Payment>> {
        query::list_by_email(&self.db, email).await
    }

    async fn create(&self, payment: NewPayment) -> AppResult<Payment> {
        query::create(&self.db, payment).await
    }
}

pub(crate) mod query {
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    };
    use uuid::Uuid;

    use crate::domain::{NewPayment, Payment};
    use crate::errors::AppResult;
    use crate::infra::repositories::entities::payment::{self, ActiveModel, Entity as PaymentEntity};

    pub async fn list_by_email<C: ConnectionTrait>(db: &C, email: &str) -> AppResult<Vec<Payment>> {
        let models = PaymentEntity::find()
            .filter(payment::Column::Email.eq(email))
            .order_by_desc(payment::Column::CreatedAt)
            .all(db)
            .await?;

        Ok(models.into_iter().map(Payment::from).collect())
    }

    pub async fn create<C: ConnectionTrait>(db: &C, payment: NewPayment) -> AppResult<Payment> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(payment.email),
            amount: Set(payment.amount),
            course_id: Set(payment.course_id),
            cart_item_id: Set(payment.cart_item_id),
            transaction_id: Set(payment.transaction_id),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(db).await?;
        Ok(Payment::from(model))
    }
}
