//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_INSTRUCTOR, ROLE_STUDENT};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Instructor,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Check if this role belongs on the instructor roster
    pub fn is_instructor(&self) -> bool {
        matches!(self, UserRole::Instructor)
    }

    /// Check if this role may publish courses
    pub fn can_teach(&self) -> bool {
        matches!(self, UserRole::Instructor | UserRole::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => ROLE_STUDENT,
            UserRole::Instructor => ROLE_INSTRUCTOR,
            UserRole::Admin => ROLE_ADMIN,
        }
    }
}

/// Stored values are trusted; anything unknown falls back to student.
impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            ROLE_INSTRUCTOR => UserRole::Instructor,
            _ => UserRole::Student,
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "student@example.com")]
    pub email: String,
    #[schema(example = "Jane Doe")]
    pub name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if user is currently an instructor
    pub fn is_instructor(&self) -> bool {
        self.role.is_instructor()
    }
}

/// Signup payload accepted by the store
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[schema(example = "student@example.com")]
    pub email: String,
    #[schema(example = "Jane Doe")]
    pub name: String,
    pub image: Option<String>,
}

/// Outcome of placing a user on the instructor roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RosterUpsert {
    /// No record existed; one was inserted
    Created,
    /// A record already existed; its snapshot was refreshed
    Refreshed,
}

/// Composite result of a role change.
///
/// Each roster sub-operation is reported separately: `instructor_upsert` is
/// set when the new role is instructor, `instructor_removed` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleTransition {
    pub user: User,
    pub previous_role: UserRole,
    pub role_changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_upsert: Option<RosterUpsert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_removed: Option<u64>,
}
