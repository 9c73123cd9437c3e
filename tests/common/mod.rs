//! Shared fixtures for integration tests.
//!
//! Each context owns a private SQLite database with every migration
//! applied. The default context is in-memory behind a single pooled
//! connection, so transactions are serialized. `with_file_store` backs the
//! context with a temporary file and a wider pool, so statements issued
//! concurrently really run on separate connections.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use sea_orm::ConnectOptions;
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use artistry_api::api::create_router;
use artistry_api::domain::{
    CartItem, Course, CourseStatus, NewCartItem, NewCourse, NewUser, PaymentIntent,
};
use artistry_api::errors::AppResult;
use artistry_api::infra::{
    CartRepository, CartStore, CourseRepository, CourseStore, Database, Migrator, PaymentGateway,
    Persistence, UserRepository, UserStore,
};
use artistry_api::services::{
    AuthService, Authenticator, Claims, PaymentProcessor, PaymentService, UserManager,
};
use artistry_api::{AppState, Config, User, UserRole};

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Payment provider stand-in that approves every intent.
pub struct FakeGateway;

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> AppResult<PaymentIntent> {
        let id = format!("pi_{amount_minor}_{currency}");
        Ok(PaymentIntent {
            client_secret: format!("{id}_secret"),
            id,
        })
    }
}

pub struct TestContext {
    pub database: Arc<Database>,
    pub config: Config,
    _dir: Option<TempDir>,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::open("sqlite::memory:".to_string(), 1, None).await
    }

    /// File-backed store shared by `connections` pooled connections.
    pub async fn with_file_store(connections: u32) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("store.db").display());

        Self::open(url, connections, Some(dir)).await
    }

    async fn open(url: String, connections: u32, dir: Option<TempDir>) -> Self {
        let mut options = ConnectOptions::new(url.clone());
        options
            .max_connections(connections)
            .min_connections(connections)
            .sqlx_logging(false);

        let connection = sea_orm::Database::connect(options)
            .await
            .expect("sqlite store");
        Migrator::up(&connection, None)
            .await
            .expect("migrations apply");

        Self {
            database: Arc::new(Database::from_connection(connection)),
            config: Config::new(url, JWT_SECRET).expect("valid config"),
            _dir: dir,
        }
    }

    pub fn course_store(&self) -> CourseStore {
        CourseStore::new(self.database.get_connection())
    }

    fn persistence(&self) -> Arc<Persistence> {
        Arc::new(Persistence::new(self.database.get_connection()))
    }

    pub fn users(&self) -> UserManager<Persistence> {
        UserManager::new(self.persistence())
    }

    pub fn payments(&self) -> PaymentProcessor<Persistence> {
        PaymentProcessor::new(self.persistence(), Arc::new(FakeGateway), "usd")
    }

    pub fn auth(&self) -> Authenticator<Persistence> {
        Authenticator::new(self.persistence(), self.config.clone())
    }

    pub fn router(&self) -> Router {
        let state = AppState::with_gateway(
            self.database.clone(),
            self.config.clone(),
            Arc::new(FakeGateway),
        );
        create_router(state, &self.config)
    }

    /// Sign up `email` and move it to `role`.
    pub async fn seed_user(&self, email: &str, role: UserRole) -> User {
        let store = UserStore::new(self.database.get_connection());
        let user = store
            .create(NewUser {
                email: email.to_string(),
                name: email.split('@').next().unwrap_or(email).to_string(),
                image: None,
            })
            .await
            .expect("user created");

        if role == UserRole::Student {
            return user;
        }
        store.update_role(user.id, role).await.expect("role set")
    }

    /// Approved course with the given seat counters.
    pub async fn seed_course(&self, available: i32, enrolled: i32) -> Course {
        self.seed_course_with_status(available, enrolled, CourseStatus::Approved)
            .await
    }

    pub async fn seed_course_with_status(
        &self,
        available: i32,
        enrolled: i32,
        status: CourseStatus,
    ) -> Course {
        let store = self.course_store();
        let course = store
            .create(NewCourse {
                title: "Watercolor Basics".to_string(),
                image: Some("https://img.example.com/watercolor.png".to_string()),
                instructor_name: "Ada".to_string(),
                instructor_email: "ada@x.com".to_string(),
                price: 49.99,
                available_seats: available + enrolled,
            })
            .await
            .expect("course created");

        for _ in 0..enrolled {
            assert!(store.claim_seat(course.id).await.expect("seat claimed"));
        }

        store
            .set_status(course.id, status)
            .await
            .expect("course status set")
    }

    pub async fn seed_cart_item(&self, email: &str, course: &Course) -> CartItem {
        CartStore::new(self.database.get_connection())
            .create(NewCartItem {
                email: email.to_string(),
                course_id: course.id,
                title: course.title.clone(),
                price: course.price,
                image: course.image.clone(),
            })
            .await
            .expect("cart item created")
    }

    pub async fn course(&self, id: Uuid) -> Course {
        CourseStore::new(self.database.get_connection())
            .find_by_id(id)
            .await
            .expect("course query")
            .expect("course exists")
    }

    pub async fn cart_items(&self, email: &str) -> Vec<CartItem> {
        CartStore::new(self.database.get_connection())
            .list_by_email(email)
            .await
            .expect("cart query")
    }

    pub async fn payment_count(&self, email: &str) -> usize {
        self.payments()
            .list_payments(email)
            .await
            .expect("payment query")
            .len()
    }

    pub fn token(&self, email: &str) -> String {
        self.auth().issue_token(email).expect("token issued").token
    }

    pub fn auth_email(&self, token: &str) -> String {
        self.auth().verify_token(token).expect("token valid").email
    }

    pub fn expired_token(&self, email: &str) -> String {
        let issued = Utc::now() - Duration::hours(3);
        let claims = Claims {
            email: email.to_string(),
            iat: issued.timestamp(),
            exp: (issued + Duration::hours(1)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
        )
        .expect("token signed")
    }

    /// Send one request through the full router.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .expect("request built");

        let response = self.router().oneshot(request).await.expect("infallible");
        read_json(response).await
    }
}

async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Error code of a `{"error": {"code", "message"}}` body.
pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

