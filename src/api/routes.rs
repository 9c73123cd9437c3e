//! Application route configuration.

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    cart_handler, course_handler, instructor_handler, jwt_handler, payment_handler, user_handler,
};
use super::middleware::{admin_middleware, auth_middleware};
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::Config;

/// Create the application router with all routes configured.
///
/// Routes fall in three groups: public, credential required, and admin.
/// Groups sharing a path are merged per method.
pub fn create_router(state: AppState, config: &Config) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(jwt_handler::public_routes())
        .merge(user_handler::public_routes())
        .merge(instructor_handler::public_routes())
        .merge(course_handler::public_routes());

    let protected = Router::new()
        .merge(user_handler::protected_routes())
        .merge(course_handler::protected_routes())
        .merge(cart_handler::protected_routes())
        .merge(payment_handler::protected_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Last layer runs first: the credential is verified before the admin check
    let admin = Router::new()
        .merge(user_handler::admin_routes())
        .merge(course_handler::admin_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public)
        .merge(protected)
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_is_permissive() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Root endpoint
async fn root() -> &'static str {
    "Artistry course marketplace is running"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
}

#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (database, healthy) = match state.database.ping().await {
        Ok(_) => (
            ServiceStatus {
                status: "healthy",
                error: None,
            },
            true,
        ),
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            (
                ServiceStatus {
                    status: "unhealthy",
                    error: Some(e.to_string()),
                },
                false,
            )
        }
    };

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        services: ServiceHealth { database },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
