//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - The payment provider client
//! - Unit of Work for transaction management

pub mod db;
pub mod payments;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, MigrationState, Migrator};
pub use payments::{PaymentGateway, StripeGateway};
pub use repositories::{
    CartRepository, CartStore, CourseRepository, CourseStore, FeedbackRepository, FeedbackStore,
    InstructorRepository, InstructorStore, PaymentRepository, PaymentStore, UserRepository,
    UserStore,
};
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use payments::MockPaymentGateway;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockCartRepository, MockCourseRepository, MockFeedbackRepository, MockInstructorRepository,
    MockPaymentRepository, MockUserRepository,
};
