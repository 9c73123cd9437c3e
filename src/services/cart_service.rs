//! Cart service - Owner-scoped cart access.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CartItem, NewCartItem};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Cart service trait for dependency injection.
///
/// Every operation takes the caller's email; items owned by someone else
/// are `Forbidden`.
#[async_trait]
pub trait CartService: Send + Sync {
    async fn list_items(&self, email: &str) -> AppResult<Vec<CartItem>>;

    async fn get_item(&self, id: Uuid, caller: &str) -> AppResult<CartItem>;

    /// Add a course to the caller's cart, snapshotting title, price and image
    async fn add_item(&self, email: String, course_id: Uuid) -> AppResult<CartItem>;

    /// Remove an item; returns removed rows
    async fn remove_item(&self, id: Uuid, caller: &str) -> AppResult<u64>;
}

/// Concrete implementation of CartService using Unit of Work.
pub struct CartManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CartManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CartService for CartManager<U> {
    async fn list_items(&self, email: &str) -> AppResult<Vec<CartItem>> {
        self.uow.carts().list_by_email(email).await
    }

    async fn get_item(&self, id: Uuid, caller: &str) -> AppResult<CartItem> {
        let item = self.uow.carts().find_by_id(id).await?.ok_or_not_found()?;
        if !item.is_owned_by(caller) {
            return Err(AppError::Forbidden);
        }
        Ok(item)
    }

    async fn add_item(&self, email: String, course_id: Uuid) -> AppResult<CartItem> {
        let course = self
            .uow
            .courses()
            .find_by_id(course_id)
            .await?
            .ok_or(AppError::CourseNotFound(course_id))?;

        let item = self
            .uow
            .carts()
            .create(NewCartItem {
                email,
                course_id,
                title: course.title,
                price: course.price,
                image: course.image,
            })
            .await?;

        tracing::debug!(cart_item_id = %item.id, course_id = %course_id, "Cart item added");
        Ok(item)
    }

    async fn remove_item(&self, id: Uuid, caller: &str) -> AppResult<u64> {
        let item = self.get_item(id, caller).await?;
        self.uow.carts().delete_owned(item.id, caller).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockCartRepository, MockCourseRepository};
    use crate::services::test_support::{course, TestUnitOfWork};
    use chrono::Utc;

    fn item(id: Uuid, email: &str) -> CartItem {
        CartItem {
            id,
            email: email.to_string(),
            course_id: Uuid::new_v4(),
            title: "Watercolor Basics".to_string(),
            price: 49.99,
            image: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_add_item_snapshots_course() {
        let course_id = Uuid::new_v4();
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .returning(|id| Ok(Some(course(id, 3, 7))));
        let mut carts = MockCartRepository::new();
        carts.expect_create().times(1).returning(|new_item| {
            Ok(CartItem {
                id: Uuid::new_v4(),
                email: new_item.email,
                course_id: new_item.course_id,
                title: new_item.title,
                price: new_item.price,
                image: new_item.image,
                created_at: Utc::now(),
            })
        });

        let uow = TestUnitOfWork::default().with_courses(courses).with_carts(carts);
        let service = CartManager::new(Arc::new(uow));
        let added = service.add_item("a@x.com".to_string(), course_id).await.unwrap();

        assert_eq!(added.course_id, course_id);
        assert_eq!(added.title, "Watercolor Basics");
        assert_eq!(added.price, 49.99);
        assert!(added.image.is_some());
    }

    #[tokio::test]
    async fn test_add_item_unknown_course() {
        let mut courses = MockCourseRepository::new();
        courses.expect_find_by_id().returning(|_| Ok(None));
        let mut carts = MockCartRepository::new();
        carts.expect_create().never();

        let uow = TestUnitOfWork::default().with_courses(courses).with_carts(carts);
        let service = CartManager::new(Arc::new(uow));
        let result = service.add_item("a@x.com".to_string(), Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::CourseNotFound(_))));
    }

    #[tokio::test]
    async fn test_get_item_of_other_owner_is_forbidden() {
        let mut carts = MockCartRepository::new();
        carts
            .expect_find_by_id()
            .returning(|id| Ok(Some(item(id, "a@x.com"))));

        let service = CartManager::new(Arc::new(TestUnitOfWork::default().with_carts(carts)));
        let result = service.get_item(Uuid::new_v4(), "b@y.com").await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_remove_item_by_owner() {
        let id = Uuid::new_v4();
        let mut carts = MockCartRepository::new();
        carts
            .expect_find_by_id()
            .returning(|id| Ok(Some(item(id, "a@x.com"))));
        carts.expect_delete_owned().times(1).returning(|_, _| Ok(1));

        let service = CartManager::new(Arc::new(TestUnitOfWork::default().with_carts(carts)));
        assert_eq!(service.remove_item(id, "a@x.com").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_item() {
        let mut carts = MockCartRepository::new();
        carts.expect_find_by_id().returning(|_| Ok(None));
        carts.expect_delete_owned().never();

        let service = CartManager::new(Arc::new(TestUnitOfWork::default().with_carts(carts)));
        let result = service.remove_item(Uuid::new_v4(), "a@x.com").await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
