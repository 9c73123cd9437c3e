//! Instructor roster entry, derived from a user whose role is instructor.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{User, UserRole};

/// Roster record. At most one exists per `instructor_id`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    pub id: Uuid,
    /// Id of the source user
    pub instructor_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Snapshot of the user fields copied onto the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct InstructorProfile {
    pub instructor_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub image: Option<String>,
}

impl From<&User> for InstructorProfile {
    fn from(user: &User) -> Self {
        Self {
            instructor_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            image: user.image.clone(),
        }
    }
}
