//! Cart repository implementation.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::{CartItem, NewCartItem};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cart repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// List the items owned by `email`, oldest first
    async fn list_by_email(&self, email: &str) -> AppResult<Vec<CartItem>>;

    /// Find item by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CartItem>>;

    /// Add an item
    async fn create(&self, item: NewCartItem) -> AppResult<CartItem>;

    /// Delete the item if it is owned by `email`; returns removed rows
    async fn delete_owned(&self, id: Uuid, email: &str) -> AppResult<u64>;
}

/// Concrete implementation of CartRepository
pub struct CartStore {
    db: DatabaseConnection,
}

impl CartStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartRepository for CartStore {
    async fn list_by_email(&self, email: &str) -> AppResult<Vec<CartItem>> {
        query::list_by_email(&self.db, email).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CartItem>> {
        query::find_by_id(&self.db, id).await
    }

    async fn create(&self, item: NewCartItem) -> AppResult<CartItem> {
        query::create(&self.db, item).await
    }

    async fn delete_owned(&self, id: Uuid, email: &str) -> AppResult<u64> {
        query::delete_owned(&self.db, id, email, None).await
    }
}

pub(crate) mod query {
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    };
    use uuid::Uuid;

    use crate::domain::{CartItem, NewCartItem};
    use crate::errors::AppResult;
    use crate::infra::repositories::entities::cart_item::{self, ActiveModel, Entity as CartEntity};

    pub async fn list_by_email<C: ConnectionTrait>(db: &C, email: &str) -> AppResult<Vec<CartItem>> {
        let models = CartEntity::find()
            .filter(cart_item::Column::Email.eq(email))
            .order_by_asc(cart_item::Column::CreatedAt)
            .all(db)
            .await?;

        Ok(models.into_iter().map(CartItem::from).collect())
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Option<CartItem>> {
        let result = CartEntity::find_by_id(id).one(db).await?;
        Ok(result.map(CartItem::from))
    }

    pub async fn create<C: ConnectionTrait>(db: &C, item: NewCartItem) -> AppResult<CartItem> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(item.email),
            course_id: Set(item.course_id),
            title: Set(item.title),
            price: Set(item.price),
            image: Set(item.image),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(db).await?;
        Ok(CartItem::from(model))
    }

    /// Delete by id and owner, optionally pinned to the course it holds.
    pub async fn delete_owned<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        email: &str,
        course_id: Option<Uuid>,
    ) -> AppResult<u64> {
        let mut delete = CartEntity::delete_many()
            .filter(cart_item::Column::Id.eq(id))
            .filter(cart_item::Column::Email.eq(email));
        if let Some(course_id) = course_id {
            delete = delete.filter(cart_item::Column::CourseId.eq(course_id));
        }

        let result = delete.exec(db).await?;
        Ok(result.rows_affected)
    }
}
