//! User repository implementation.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::{NewUser, User, UserRole};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new student; fails with `Conflict` if the email is taken
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Set the role field, returning the updated user
    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<User>;

    /// Permanently delete a user, returning the number of removed rows
    async fn delete(&self, id: Uuid) -> AppResult<u64>;

    /// List all users
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        query::find_by_id(&self.db, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        query::find_by_email(&self.db, email).await
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        query::create(&self.db, new_user).await
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<User> {
        query::update_role(&self.db, id, role).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<u64> {
        query::delete(&self.db, id).await
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        query::list(&self.db).await
    }
}

/// Statements shared by the pooled store and transaction-scoped repositories.
pub(crate) mod query {
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    };
    use uuid::Uuid;

    use crate::config::ROLE_STUDENT;
    use crate::domain::{NewUser, User, UserRole};
    use crate::errors::{AppError, AppResult};
    use crate::infra::repositories::entities::user::{self, ActiveModel, Entity as UserEntity};

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(db).await?;
        Ok(result.map(User::from))
    }

    pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(db)
            .await?;

        Ok(result.map(User::from))
    }

    pub async fn create<C: ConnectionTrait>(db: &C, new_user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(new_user.email),
            name: Set(new_user.name),
            role: Set(ROLE_STUDENT.to_string()),
            image: Set(new_user.image),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(db)
            .await
            .map_err(|e| AppError::from_db_unique(e, "User"))?;

        Ok(User::from(model))
    }

    pub async fn update_role<C: ConnectionTrait>(db: &C, id: Uuid, role: UserRole) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();
        active.role = Set(role.to_string());

        let model = active.update(db).await?;
        Ok(User::from(model))
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<u64> {
        let result = UserEntity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected)
    }

    pub async fn list<C: ConnectionTrait>(db: &C) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }
}
