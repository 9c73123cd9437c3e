//! Shopping cart entries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A course a user intends to buy. Owned by `email`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Uuid,
    pub email: String,
    pub course_id: Uuid,
    pub title: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CartItem {
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.email == email
    }
}

/// Cart entry with the course snapshot already resolved
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub email: String,
    pub course_id: Uuid,
    pub title: String,
    pub price: f64,
    pub image: Option<String>,
}
