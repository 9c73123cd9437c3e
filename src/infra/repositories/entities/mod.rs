//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod cart_item;
pub mod course;
pub mod feedback;
pub mod instructor;
pub mod payment;
pub mod user;
