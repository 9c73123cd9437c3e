//! Course repository with atomic seat accounting.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::{Course, CourseStatus, NewCourse};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Course repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// List courses, most enrolled first
    async fn list_by_popularity(&self) -> AppResult<Vec<Course>>;

    /// Find course by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Course>>;

    /// Create a pending course with no enrollments
    async fn create(&self, new_course: NewCourse) -> AppResult<Course>;

    /// Set the review status
    async fn set_status(&self, id: Uuid, status: CourseStatus) -> AppResult<Course>;

    /// Set the feedback field
    async fn set_feedback(&self, id: Uuid, feedback: String) -> AppResult<Course>;

    /// Move one seat from available to enrolled.
    ///
    /// Returns `false` when the course has no seat left (or does not exist).
    async fn claim_seat(&self, id: Uuid) -> AppResult<bool>;
}

/// Concrete implementation of CourseRepository
pub struct CourseStore {
    db: DatabaseConnection,
}

impl CourseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for CourseStore {
    async fn list_by_popularity(&self) -> AppResult<Vec<Course>> {
        query::list_by_popularity(&self.db).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Course>> {
        query::find_by_id(&self.db, id).await
    }

    async fn create(&self, new_course: NewCourse) -> AppResult<Course> {
        query::create(&self.db, new_course).await
    }

    async fn set_status(&self, id: Uuid, status: CourseStatus) -> AppResult<Course> {
        query::set_status(&self.db, id, status).await
    }

    async fn set_feedback(&self, id: Uuid, feedback: String) -> AppResult<Course> {
        query::set_feedback(&self.db, id, feedback).await
    }

    async fn claim_seat(&self, id: Uuid) -> AppResult<bool> {
        query::claim_seat(&self.db, id).await
    }
}

pub(crate) mod query {
    use sea_orm::sea_query::Expr;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    };
    use uuid::Uuid;

    use crate::domain::{Course, CourseStatus, NewCourse};
    use crate::errors::{AppError, AppResult};
    use crate::infra::repositories::entities::course::{self, ActiveModel, Entity as CourseEntity};

    pub async fn list_by_popularity<C: ConnectionTrait>(db: &C) -> AppResult<Vec<Course>> {
        let models = CourseEntity::find()
            .order_by_desc(course::Column::EnrolledStudents)
            .order_by_asc(course::Column::CreatedAt)
            .all(db)
            .await?;

        Ok(models.into_iter().map(Course::from).collect())
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Option<Course>> {
        let result = CourseEntity::find_by_id(id).one(db).await?;
        Ok(result.map(Course::from))
    }

    pub async fn create<C: ConnectionTrait>(db: &C, new_course: NewCourse) -> AppResult<Course> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new_course.title),
            image: Set(new_course.image),
            instructor_name: Set(new_course.instructor_name),
            instructor_email: Set(new_course.instructor_email),
            price: Set(new_course.price),
            available_seats: Set(new_course.available_seats),
            enrolled_students: Set(0),
            status: Set(CourseStatus::Pending.to_string()),
            feedback: Set(None),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(db).await?;
        Ok(Course::from(model))
    }

    async fn find_model<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<course::Model> {
        CourseEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(AppError::CourseNotFound(id))
    }

    pub async fn set_status<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        status: CourseStatus,
    ) -> AppResult<Course> {
        let mut active: ActiveModel = find_model(db, id).await?.into();
        active.status = Set(status.to_string());

        let model = active.update(db).await?;
        Ok(Course::from(model))
    }

    pub async fn set_feedback<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        feedback: String,
    ) -> AppResult<Course> {
        let mut active: ActiveModel = find_model(db, id).await?.into();
        active.feedback = Set(Some(feedback));

        let model = active.update(db).await?;
        Ok(Course::from(model))
    }

    /// Single conditional UPDATE, so concurrent claims cannot oversubscribe.
    pub async fn claim_seat<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<bool> {
        let result = CourseEntity::update_many()
            .col_expr(
                course::Column::AvailableSeats,
                Expr::col(course::Column::AvailableSeats).sub(1),
            )
            .col_expr(
                course::Column::EnrolledStudents,
                Expr::col(course::Column::EnrolledStudents).add(1),
            )
            .filter(course::Column::Id.eq(id))
            .filter(course::Column::AvailableSeats.gt(0))
            .exec(db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
