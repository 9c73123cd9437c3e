//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Each repository keeps its statements in a `query` module generic over
//! the connection, so the same SQL runs pooled or inside a transaction.

mod cart_repository;
mod course_repository;
pub(crate) mod entities;
mod feedback_repository;
mod instructor_repository;
mod payment_repository;
mod user_repository;

pub use cart_repository::{CartRepository, CartStore};
pub use course_repository::{CourseRepository, CourseStore};
pub use feedback_repository::{FeedbackRepository, FeedbackStore};
pub use instructor_repository::{InstructorRepository, InstructorStore};
pub use payment_repository::{PaymentRepository, PaymentStore};
pub use user_repository::{UserRepository, UserStore};

pub(crate) use cart_repository::query as cart_query;
pub(crate) use course_repository::query as course_query;
pub(crate) use feedback_repository::query as feedback_query;
pub(crate) use instructor_repository::query as instructor_query;
pub(crate) use payment_repository::query as payment_query;
pub(crate) use user_repository::query as user_query;

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use cart_repository::MockCartRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use course_repository::MockCourseRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use feedback_repository::MockFeedbackRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use instructor_repository::MockInstructorRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use payment_repository::MockPaymentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
