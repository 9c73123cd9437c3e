//! Service Container - Centralized service access.
//!
//! SOLID (DIP): Depends on service traits, not implementations.

use std::sync::Arc;

use super::{AuthService, CartService, CourseService, PaymentService, UserService};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{PaymentGateway, Persistence, StripeGateway};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn courses(&self) -> Arc<dyn CourseService>;

    fn carts(&self) -> Arc<dyn CartService>;

    fn payments(&self) -> Arc<dyn PaymentService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    course_service: Arc<dyn CourseService>,
    cart_service: Arc<dyn CartService>,
    payment_service: Arc<dyn PaymentService>,
}

impl Services {
    /// Create service container from database connection and config,
    /// talking to the configured payment provider.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> AppResult<Self> {
        let gateway = Arc::new(StripeGateway::new(&config)?);
        Ok(Self::with_gateway(db, config, gateway))
    }

    /// Create service container with an explicit payment gateway
    pub fn with_gateway(
        db: sea_orm::DatabaseConnection,
        config: Config,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        use super::{Authenticator, CartManager, CourseCatalog, PaymentProcessor, UserManager};

        let uow = Arc::new(Persistence::new(db));
        let currency = config.payment_currency.clone();

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            course_service: Arc::new(CourseCatalog::new(uow.clone())),
            cart_service: Arc::new(CartManager::new(uow.clone())),
            payment_service: Arc::new(PaymentProcessor::new(uow, gateway, currency)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn courses(&self) -> Arc<dyn CourseService> {
        self.course_service.clone()
    }

    fn carts(&self) -> Arc<dyn CartService> {
        self.cart_service.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentService> {
        self.payment_service.clone()
    }
}
