//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod cart;
pub mod course;
pub mod feedback;
pub mod instructor;
pub mod payment;
pub mod user;

pub use cart::{CartItem, NewCartItem};
pub use course::{Course, CourseStatus, NewCourse, SeatCounts};
pub use feedback::Feedback;
pub use instructor::{Instructor, InstructorProfile};
pub use payment::{to_minor_units, Enrollment, NewPayment, Payment, PaymentIntent};
pub use user::{NewUser, RoleTransition, RosterUpsert, User, UserRole};
