//! Feedback repository implementation.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::Feedback;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// List feedback, newest first
    async fn list(&self) -> AppResult<Vec<Feedback>>;

    /// Append a feedback note for a course
    async fn create(&self, course_id: Uuid, author_email: String, text: String) -> AppResult<Feedback>;
}

/// Concrete implementation of FeedbackRepository
pub struct FeedbackStore {
    db: DatabaseConnection,
}

impl FeedbackStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeedbackRepository for FeedbackStore {
    async fn list(&self) -> AppResult<Vec<Feedback>> {
        query::list(&self.db).await
    }

    async fn create(&self, course_id: Uuid, author_email: String, text: String) -> AppResult<Feedback> {
        query::create(&self.db, course_id, author_email, text).await
    }
}

pub(crate) mod query {
    use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};
    use uuid::Uuid;

    use crate::domain::Feedback;
    use crate::errors::AppResult;
    use crate::infra::repositories::entities::feedback::{self, ActiveModel, Entity as FeedbackEntity};

    pub async fn list<C: ConnectionTrait>(db: &C) -> AppResult<Vec<Feedback>> {
        let models = FeedbackEntity::find()
            .order_by_desc(feedback::Column::CreatedAt)
            .all(db)
            .await?;

        Ok(models.into_iter().map(Feedback::from).collect())
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        course_id: Uuid,
        author_email: String,
        text: String,
    ) -> AppResult<Feedback> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            author_email: Set(author_email),
            text: Set(text),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(db).await?;
        Ok(Feedback::from(model))
    }
}
