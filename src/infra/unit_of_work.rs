//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and owns the transaction lifecycle, so that
//! multi-step workflows (payment reconciliation, role transitions, review
//! feedback, account deletion) either commit as a whole or leave no trace.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::{
    cart_query, course_query, feedback_query, instructor_query, payment_query, user_query,
    CartRepository, CartStore, CourseRepository, CourseStore, FeedbackRepository, FeedbackStore,
    InstructorRepository, InstructorStore, PaymentRepository, PaymentStore, UserRepository,
    UserStore,
};
use crate::domain::{
    Course, Feedback, InstructorProfile, NewPayment, Payment, RosterUpsert, User, UserRole,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because `transaction` is generic. Services that
/// only touch single repositories are unit tested with repository mocks;
/// transactional flows are covered by integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn instructors(&self) -> Arc<dyn InstructorRepository>;

    fn courses(&self) -> Arc<dyn CourseRepository>;

    fn carts(&self) -> Arc<dyn CartRepository>;

    fn feedback(&self) -> Arc<dyn FeedbackRepository>;

    fn payments(&self) -> Arc<dyn PaymentRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Committed when the closure returns `Ok`, rolled back otherwise.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Repository access scoped to one open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    pub fn instructors(&self) -> TxInstructorRepository<'_> {
        TxInstructorRepository { txn: self.txn }
    }

    pub fn courses(&self) -> TxCourseRepository<'_> {
        TxCourseRepository { txn: self.txn }
    }

    pub fn carts(&self) -> TxCartRepository<'_> {
        TxCartRepository { txn: self.txn }
    }

    pub fn feedback(&self) -> TxFeedbackRepository<'_> {
        TxFeedbackRepository { txn: self.txn }
    }

    pub fn payments(&self) -> TxPaymentRepository<'_> {
        TxPaymentRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    instructor_repo: Arc<InstructorStore>,
    course_repo: Arc<CourseStore>,
    cart_repo: Arc<CartStore>,
    feedback_repo: Arc<FeedbackStore>,
    payment_repo: Arc<PaymentStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            instructor_repo: Arc::new(InstructorStore::new(db.clone())),
            course_repo: Arc::new(CourseStore::new(db.clone())),
            cart_repo: Arc::new(CartStore::new(db.clone())),
            feedback_repo: Arc::new(FeedbackStore::new(db.clone())),
            payment_repo: Arc::new(PaymentStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn instructors(&self) -> Arc<dyn InstructorRepository> {
        self.instructor_repo.clone()
    }

    fn courses(&self) -> Arc<dyn CourseRepository> {
        self.course_repo.clone()
    }

    fn carts(&self) -> Arc<dyn CartRepository> {
        self.cart_repo.clone()
    }

    fn feedback(&self) -> Arc<dyn FeedbackRepository> {
        self.feedback_repo.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentRepository> {
        self.payment_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        user_query::find_by_id(self.txn, id).await
    }

    pub async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<User> {
        user_query::update_role(self.txn, id, role).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<u64> {
        user_query::delete(self.txn, id).await
    }
}

/// Transaction-aware instructor roster.
pub struct TxInstructorRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxInstructorRepository<'a> {
    pub async fn upsert(&self, profile: InstructorProfile) -> AppResult<RosterUpsert> {
        instructor_query::upsert(self.txn, profile).await
    }

    pub async fn remove(&self, instructor_id: Uuid) -> AppResult<u64> {
        instructor_query::remove(self.txn, instructor_id).await
    }
}

/// Transaction-aware course repository.
pub struct TxCourseRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxCourseRepository<'a> {
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Course>> {
        course_query::find_by_id(self.txn, id).await
    }

    pub async fn set_feedback(&self, id: Uuid, feedback: String) -> AppResult<Course> {
        course_query::set_feedback(self.txn, id, feedback).await
    }

    pub async fn claim_seat(&self, id: Uuid) -> AppResult<bool> {
        course_query::claim_seat(self.txn, id).await
    }
}

/// Transaction-aware cart repository.
pub struct TxCartRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxCartRepository<'a> {
    /// Remove the cart line that paid for `course_id`, if the owner still has it.
    pub async fn delete_paid(&self, id: Uuid, email: &str, course_id: Uuid) -> AppResult<u64> {
        cart_query::delete_owned(self.txn, id, email, Some(course_id)).await
    }
}

/// Transaction-aware feedback repository.
pub struct TxFeedbackRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxFeedbackRepository<'a> {
    pub async fn create(
        &self,
        course_id: Uuid,
        author_email: String,
        text: String,
    ) -> AppResult<Feedback> {
        feedback_query::create(self.txn, course_id, author_email, text).await
    }
}

/// Transaction-aware payment repository.
pub struct TxPaymentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxPaymentRepository<'a> {
    pub async fn create(&self, payment: NewPayment) -> AppResult<Payment> {
        payment_query::create(self.txn, payment).await
    }
}

/// Simpler API for executing transactional operations.
///
/// This helper macro reduces boilerplate when using transactions.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
