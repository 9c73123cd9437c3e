//! Course domain entity and seat accounting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{STATUS_APPROVED, STATUS_DENIED, STATUS_PENDING};

/// Review status of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Pending,
    Approved,
    Denied,
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Pending => STATUS_PENDING,
            CourseStatus::Approved => STATUS_APPROVED,
            CourseStatus::Denied => STATUS_DENIED,
        }
    }
}

impl From<&str> for CourseStatus {
    fn from(s: &str) -> Self {
        match s {
            STATUS_APPROVED => CourseStatus::Approved,
            STATUS_DENIED => CourseStatus::Denied,
            _ => CourseStatus::Pending,
        }
    }
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Course domain entity
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    #[schema(example = "Watercolor Basics")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub instructor_name: String,
    pub instructor_email: String,
    #[schema(example = 49.99)]
    pub price: f64,
    pub available_seats: i32,
    pub enrolled_students: i32,
    pub status: CourseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Course {
    /// Seat counters as a standalone value
    pub fn seats(&self) -> SeatCounts {
        SeatCounts {
            available_seats: self.available_seats,
            enrolled_students: self.enrolled_students,
        }
    }

    /// Only approved courses take enrollments
    pub fn is_open_for_enrollment(&self) -> bool {
        self.status == CourseStatus::Approved
    }
}

/// Seat counters of a course.
///
/// `available_seats + enrolled_students` is conserved by every enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeatCounts {
    pub available_seats: i32,
    pub enrolled_students: i32,
}

impl SeatCounts {
    pub fn capacity(&self) -> i32 {
        self.available_seats + self.enrolled_students
    }
}

/// Course submission accepted by the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub title: String,
    pub image: Option<String>,
    pub instructor_name: String,
    pub instructor_email: String,
    pub price: f64,
    pub available_seats: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_str() {
        assert_eq!(CourseStatus::from("approved"), CourseStatus::Approved);
        assert_eq!(CourseStatus::from("denied"), CourseStatus::Denied);
        assert_eq!(CourseStatus::from("whatever"), CourseStatus::Pending);
    }

    #[test]
    fn test_only_approved_courses_open_for_enrollment() {
        let mut course = Course {
            id: Uuid::new_v4(),
            title: "Watercolor Basics".to_string(),
            image: None,
            instructor_name: "Ada".to_string(),
            instructor_email: "ada@x.com".to_string(),
            price: 49.99,
            available_seats: 3,
            enrolled_students: 0,
            status: CourseStatus::Pending,
            feedback: None,
            created_at: Utc::now(),
        };
        assert!(!course.is_open_for_enrollment());

        course.status = CourseStatus::Denied;
        assert!(!course.is_open_for_enrollment());

        course.status = CourseStatus::Approved;
        assert!(course.is_open_for_enrollment());
    }
}
