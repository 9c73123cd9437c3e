//! Instructor roster repository.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::{Instructor, InstructorProfile, RosterUpsert};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Roster repository trait. Records are keyed by `instructor_id`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait InstructorRepository: Send + Sync {
    /// List the roster
    async fn list(&self) -> AppResult<Vec<Instructor>>;

    /// Find the record derived from the given user
    async fn find_by_instructor_id(&self, instructor_id: Uuid) -> AppResult<Option<Instructor>>;

    /// Insert the record, or refresh it if one already exists
    async fn upsert(&self, profile: InstructorProfile) -> AppResult<RosterUpsert>;

    /// Remove every record derived from the given user
    async fn remove(&self, instructor_id: Uuid) -> AppResult<u64>;
}

/// Concrete implementation of InstructorRepository
pub struct InstructorStore {
    db: DatabaseConnection,
}

impl InstructorStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InstructorRepository for InstructorStore {
    async fn list(&self) -> AppResult<Vec<Instructor>> {
        query::list(&self.db).await
    }

    async fn find_by_instructor_id(&self, instructor_id: Uuid) -> AppResult<Option<Instructor>> {
        query::find_by_instructor_id(&self.db, instructor_id).await
    }

    async fn upsert(&self, profile: InstructorProfile) -> AppResult<RosterUpsert> {
        query::upsert(&self.db, profile).await
    }

    async fn remove(&self, instructor_id: Uuid) -> AppResult<u64> {
        query::remove(&self.db, instructor_id).await
    }
}

pub(crate) mod query {
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    };
    use uuid::Uuid;

    use crate::domain::{Instructor, InstructorProfile, RosterUpsert};
    use crate::errors::{AppError, AppResult};
    use crate::infra::repositories::entities::instructor::{
        self, ActiveModel, Entity as InstructorEntity,
    };

    pub async fn list<C: ConnectionTrait>(db: &C) -> AppResult<Vec<Instructor>> {
        let models = InstructorEntity::find()
            .order_by_asc(instructor::Column::Name)
            .all(db)
            .await?;

        Ok(models.into_iter().map(Instructor::from).collect())
    }

    pub async fn find_by_instructor_id<C: ConnectionTrait>(
        db: &C,
        instructor_id: Uuid,
    ) -> AppResult<Option<Instructor>> {
        let result = InstructorEntity::find()
            .filter(instructor::Column::InstructorId.eq(instructor_id))
            .one(db)
            .await?;

        Ok(result.map(Instructor::from))
    }

    pub async fn upsert<C: ConnectionTrait>(
        db: &C,
        profile: InstructorProfile,
    ) -> AppResult<RosterUpsert> {
        let existing = InstructorEntity::find()
            .filter(instructor::Column::InstructorId.eq(profile.instructor_id))
            .one(db)
            .await?;

        match existing {
            Some(model) => {
                let mut active: ActiveModel = model.into();
                active.name = Set(profile.name);
                active.email = Set(profile.email);
                active.role = Set(profile.role.to_string());
                active.image = Set(profile.image);
                active.update(db).await?;
                Ok(RosterUpsert::Refreshed)
            }
            None => {
                let active_model = ActiveModel {
                    id: Set(Uuid::new_v4()),
                    instructor_id: Set(profile.instructor_id),
                    name: Set(profile.name),
                    email: Set(profile.email),
                    role: Set(profile.role.to_string()),
                    image: Set(profile.image),
                    created_at: Set(chrono::Utc::now()),
                };
                // unique index on instructor_id turns a concurrent double insert into Conflict
                active_model
                    .insert(db)
                    .await
                    .map_err(|e| AppError::from_db_unique(e, "Instructor"))?;
                Ok(RosterUpsert::Created)
            }
        }
    }

    pub async fn remove<C: ConnectionTrait>(db: &C, instructor_id: Uuid) -> AppResult<u64> {
        let result = InstructorEntity::delete_many()
            .filter(instructor::Column::InstructorId.eq(instructor_id))
            .exec(db)
            .await?;

        Ok(result.rows_affected)
    }
}
