//! HTTP request handlers.

pub mod cart_handler;
pub mod course_handler;
pub mod instructor_handler;
pub mod jwt_handler;
pub mod payment_handler;
pub mod user_handler;
