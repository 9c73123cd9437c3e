//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

mod auth_service;
mod cart_service;
pub mod container;
mod course_service;
mod payment_service;
mod user_service;

#[cfg(test)]
pub(crate) mod test_support;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use cart_service::{CartManager, CartService};
pub use course_service::{CourseCatalog, CourseService};
pub use payment_service::{PaymentProcessor, PaymentService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
