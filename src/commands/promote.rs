//! Promote command - Role changes without an admin credential.
//!
//! Every role change over HTTP needs an admin, so a fresh deployment gets
//! its first admin from here.

use std::sync::Arc;

use crate::cli::args::PromoteArgs;
use crate::config::Config;
use crate::domain::{RoleTransition, UserRole};
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{UserManager, UserService};

/// Execute the promote command
pub async fn execute(args: PromoteArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let transition = promote(&db, &args.email, args.role.into()).await?;

    println!(
        "{}: {} -> {}",
        transition.user.email, transition.previous_role, transition.user.role
    );
    Ok(())
}

/// Apply `role` to the signed-up user `email`, roster included.
pub async fn promote(db: &Database, email: &str, role: UserRole) -> AppResult<RoleTransition> {
    let users = UserManager::new(Arc::new(Persistence::new(db.get_connection())));
    let user = users.find_by_email(email).await?;

    let transition = users.set_role(user.id, role).await?;
    tracing::info!(email = %email, role = %role, "Role assigned from the command line");
    Ok(transition)
}
