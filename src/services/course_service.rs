//! Course catalog service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::MAX_FEEDBACK_LENGTH;
use crate::domain::{Course, CourseStatus, Feedback, NewCourse};
use crate::errors::{AppError, AppResult};
use crate::infra::{TransactionContext, UnitOfWork};
use crate::with_transaction;

/// Course service trait for dependency injection.
#[async_trait]
pub trait CourseService: Send + Sync {
    /// List courses, most enrolled first
    async fn list_courses(&self) -> AppResult<Vec<Course>>;

    async fn get_course(&self, id: Uuid) -> AppResult<Course>;

    /// Submit a course for review
    async fn create_course(&self, new_course: NewCourse) -> AppResult<Course>;

    async fn set_status(&self, id: Uuid, status: CourseStatus) -> AppResult<Course>;

    /// Record review feedback on the course and in the feedback log
    async fn set_feedback(&self, id: Uuid, author_email: String, text: String)
        -> AppResult<Course>;

    /// List feedback, newest first
    async fn list_feedback(&self) -> AppResult<Vec<Feedback>>;
}

/// Concrete implementation of CourseService using Unit of Work.
pub struct CourseCatalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CourseCatalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

async fn record_feedback(
    ctx: TransactionContext<'_>,
    id: Uuid,
    author_email: String,
    text: String,
) -> AppResult<Course> {
    let course = ctx.courses().set_feedback(id, text.clone()).await?;
    ctx.feedback().create(id, author_email, text).await?;
    Ok(course)
}

#[async_trait]
impl<U: UnitOfWork> CourseService for CourseCatalog<U> {
    async fn list_courses(&self) -> AppResult<Vec<Course>> {
        self.uow.courses().list_by_popularity().await
    }

    async fn get_course(&self, id: Uuid) -> AppResult<Course> {
        self.uow
            .courses()
            .find_by_id(id)
            .await?
            .ok_or(AppError::CourseNotFound(id))
    }

    async fn create_course(&self, new_course: NewCourse) -> AppResult<Course> {
        let course = self.uow.courses().create(new_course).await?;
        tracing::info!(course_id = %course.id, instructor = %course.instructor_email, "Course submitted");
        Ok(course)
    }

    async fn set_status(&self, id: Uuid, status: CourseStatus) -> AppResult<Course> {
        let course = self.uow.courses().set_status(id, status).await?;
        tracing::info!(course_id = %id, status = %status, "Course status changed");
        Ok(course)
    }

    async fn set_feedback(
        &self,
        id: Uuid,
        author_email: String,
        text: String,
    ) -> AppResult<Course> {
        if text.trim().is_empty() {
            return Err(AppError::validation("Feedback must not be empty"));
        }
        if text.chars().count() as u64 > MAX_FEEDBACK_LENGTH {
            return Err(AppError::validation("Feedback is too long"));
        }

        with_transaction!(self.uow, |ctx| record_feedback(ctx, id, author_email, text).await)
    }

    async fn list_feedback(&self) -> AppResult<Vec<Feedback>> {
        self.uow.feedback().list().await
    }
}
