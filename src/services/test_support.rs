//! Mocked Unit of Work shared by the service unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Course, CourseStatus, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::{
    CartRepository, CourseRepository, FeedbackRepository, InstructorRepository,
    MockCartRepository, MockCourseRepository, MockFeedbackRepository, MockInstructorRepository,
    MockPaymentRepository, MockUserRepository, PaymentRepository, TransactionContext, UnitOfWork,
    UserRepository,
};

/// Wraps one mock per repository; unset repositories expect no calls.
pub struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    instructors: Arc<MockInstructorRepository>,
    courses: Arc<MockCourseRepository>,
    carts: Arc<MockCartRepository>,
    feedback: Arc<MockFeedbackRepository>,
    payments: Arc<MockPaymentRepository>,
}

impl Default for TestUnitOfWork {
    fn default() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            instructors: Arc::new(MockInstructorRepository::new()),
            courses: Arc::new(MockCourseRepository::new()),
            carts: Arc::new(MockCartRepository::new()),
            feedback: Arc::new(MockFeedbackRepository::new()),
            payments: Arc::new(MockPaymentRepository::new()),
        }
    }
}

impl TestUnitOfWork {
    pub fn with_users(mut self, repo: MockUserRepository) -> Self {
        self.users = Arc::new(repo);
        self
    }

    pub fn with_instructors(mut self, repo: MockInstructorRepository) -> Self {
        self.instructors = Arc::new(repo);
        self
    }

    pub fn with_courses(mut self, repo: MockCourseRepository) -> Self {
        self.courses = Arc::new(repo);
        self
    }

    pub fn with_carts(mut self, repo: MockCartRepository) -> Self {
        self.carts = Arc::new(repo);
        self
    }

    pub fn with_feedback(mut self, repo: MockFeedbackRepository) -> Self {
        self.feedback = Arc::new(repo);
        self
    }

    pub fn with_payments(mut self, repo: MockPaymentRepository) -> Self {
        self.payments = Arc::new(repo);
        self
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn instructors(&self) -> Arc<dyn InstructorRepository> {
        self.instructors.clone()
    }

    fn courses(&self) -> Arc<dyn CourseRepository> {
        self.courses.clone()
    }

    fn carts(&self) -> Arc<dyn CartRepository> {
        self.carts.clone()
    }

    fn feedback(&self) -> Arc<dyn FeedbackRepository> {
        self.feedback.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentRepository> {
        self.payments.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transactional flows are covered by the SQLite integration tests
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

pub fn user_with_role(email: &str, role: UserRole) -> User {
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: "Test User".to_string(),
        role,
        image: None,
        created_at: Utc::now(),
    }
}

pub fn course(id: Uuid, available_seats: i32, enrolled_students: i32) -> Course {
    Course {
        id,
        title: "Watercolor Basics".to_string(),
        image: Some("https://img.example.com/watercolor.png".to_string()),
        instructor_name: "Ada".to_string(),
        instructor_email: "ada@example.com".to_string(),
        price: 49.99,
        available_seats,
        enrolled_students,
        status: CourseStatus::Approved,
        feedback: None,
        created_at: Utc::now(),
    }
}
