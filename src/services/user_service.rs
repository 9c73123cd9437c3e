//! User service - Accounts, role transitions and the instructor roster.
//!
//! The roster is derived data: a record exists for a user exactly while
//! that user's role is instructor. Role changes and deletions update the
//! roster inside the same transaction as the user row.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Instructor, InstructorProfile, NewUser, RoleTransition, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::{TransactionContext, UnitOfWork};
use crate::with_transaction;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List every user
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by email
    async fn find_by_email(&self, email: &str) -> AppResult<User>;

    /// Sign up a new student; an existing email is a `Conflict`
    async fn create_user(&self, new_user: NewUser) -> AppResult<User>;

    /// Change a user's role and bring the roster in line with it
    async fn set_role(&self, id: Uuid, role: UserRole) -> AppResult<RoleTransition>;

    /// Delete a user and any roster record; returns deleted user rows
    async fn delete_user(&self, id: Uuid) -> AppResult<u64>;

    /// List the instructor roster
    async fn list_instructors(&self) -> AppResult<Vec<Instructor>>;

    /// Get a roster record by the source user id
    async fn get_instructor(&self, instructor_id: Uuid) -> AppResult<Instructor>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

async fn apply_role_change(
    ctx: TransactionContext<'_>,
    id: Uuid,
    role: UserRole,
) -> AppResult<RoleTransition> {
    let previous_role = ctx
        .users()
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound)?
        .role;

    let user = ctx.users().update_role(id, role).await?;

    let (instructor_upsert, instructor_removed) = if role.is_instructor() {
        let outcome = ctx
            .instructors()
            .upsert(InstructorProfile::from(&user))
            .await?;
        (Some(outcome), None)
    } else {
        (None, Some(ctx.instructors().remove(user.id).await?))
    };

    Ok(RoleTransition {
        role_changed: previous_role != role,
        previous_role,
        user,
        instructor_upsert,
        instructor_removed,
    })
}

async fn remove_account(ctx: TransactionContext<'_>, id: Uuid) -> AppResult<u64> {
    let deleted = ctx.users().delete(id).await?;
    ctx.instructors().remove(id).await?;
    Ok(deleted)
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().list().await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<User> {
        self.uow
            .users()
            .find_by_email(email)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        if self.uow.users().find_by_email(&new_user.email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        // Unique index on email still catches a concurrent signup
        let user = self.uow.users().create(new_user).await?;
        tracing::info!(user_id = %user.id, email = %user.email, "User signed up");
        Ok(user)
    }

    async fn set_role(&self, id: Uuid, role: UserRole) -> AppResult<RoleTransition> {
        let transition = with_transaction!(self.uow, |ctx| apply_role_change(ctx, id, role).await)?;

        tracing::info!(
            user_id = %id,
            from = %transition.previous_role,
            to = %role,
            roster_upsert = ?transition.instructor_upsert,
            roster_removed = ?transition.instructor_removed,
            "Role transition applied"
        );

        Ok(transition)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<u64> {
        let deleted = with_transaction!(self.uow, |ctx| remove_account(ctx, id).await)?;
        tracing::info!(user_id = %id, deleted, "User deleted");
        Ok(deleted)
    }

    async fn list_instructors(&self) -> AppResult<Vec<Instructor>> {
        self.uow.instructors().list().await
    }

    async fn get_instructor(&self, instructor_id: Uuid) -> AppResult<Instructor> {
        self.uow
            .instructors()
            .find_by_instructor_id(instructor_id)
            .await?
            .ok_or(AppError::NotFound)
    }
}
