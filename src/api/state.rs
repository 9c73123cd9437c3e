//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, PaymentGateway};
use crate::services::{
    AuthService, CartService, CourseService, PaymentService, ServiceContainer, Services,
    UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub course_service: Arc<dyn CourseService>,
    pub cart_service: Arc<dyn CartService>,
    pub payment_service: Arc<dyn PaymentService>,
    /// Database handle, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config,
    /// using the configured payment provider.
    pub fn from_config(database: Arc<Database>, config: Config) -> AppResult<Self> {
        let container = Services::from_connection(database.get_connection(), config)?;
        Ok(Self::from_container(&container, database))
    }

    /// Create application state with an explicit payment gateway.
    pub fn with_gateway(
        database: Arc<Database>,
        config: Config,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        let container = Services::with_gateway(database.get_connection(), config, gateway);
        Self::from_container(&container, database)
    }

    fn from_container(container: &impl ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            course_service: container.courses(),
            cart_service: container.carts(),
            payment_service: container.payments(),
            database,
        }
    }
}
