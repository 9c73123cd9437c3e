//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    CORS_ANY_ORIGIN, DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_PAYMENT_API_BASE,
    DEFAULT_PAYMENT_CURRENCY, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Development-only JWT secret used when `JWT_SECRET` is unset in debug builds
const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    payment_secret_key: String,
    pub payment_api_base: String,
    pub payment_currency: String,
    pub cors_origins: Vec<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("payment_secret_key", &"[REDACTED]")
            .field("payment_api_base", &self.payment_api_base)
            .field("payment_currency", &self.payment_currency)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

impl Config {
    /// Build a configuration with defaults for everything but the signing secret.
    ///
    /// Used by tests and embedders that do not read the process environment.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> AppResult<Self> {
        let jwt_secret = jwt_secret.into();
        validate_jwt_secret(&jwt_secret)?;

        Ok(Self {
            database_url: database_url.into(),
            jwt_secret,
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            payment_secret_key: String::new(),
            payment_api_base: DEFAULT_PAYMENT_API_BASE.to_string(),
            payment_currency: DEFAULT_PAYMENT_CURRENCY.to_string(),
            cors_origins: vec![CORS_ANY_ORIGIN.to_string()],
        })
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails if JWT_SECRET is missing in a release build, is too short,
    /// or a numeric variable cannot be parsed.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        let mut config = Self::new(
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
        )?;

        if let Ok(hours) = env::var("JWT_EXPIRATION_HOURS") {
            config.jwt_expiration_hours = parse_var("JWT_EXPIRATION_HOURS", &hours)?;
        }
        if let Ok(host) = env::var("SERVER_HOST") {
            config.server_host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT") {
            config.server_port = parse_var("SERVER_PORT", &port)?;
        }
        match env::var("PAYMENT_SECRET_KEY") {
            Ok(key) => config.payment_secret_key = key,
            Err(_) => tracing::warn!("PAYMENT_SECRET_KEY not set, payment intents will be rejected"),
        }
        if let Ok(base) = env::var("PAYMENT_API_BASE") {
            config.payment_api_base = base.trim_end_matches('/').to_string();
        }
        if let Ok(currency) = env::var("PAYMENT_CURRENCY") {
            config.payment_currency = currency.to_lowercase();
        }
        if let Ok(origins) = env::var("CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect();
        }

        Ok(config)
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Secret key presented to the payment provider.
    pub fn payment_secret_key(&self) -> &str {
        &self.payment_secret_key
    }

    /// Replace the payment provider secret key.
    pub fn with_payment_secret_key(mut self, key: impl Into<String>) -> Self {
        self.payment_secret_key = key.into();
        self
    }

    /// Whether every origin may call the API.
    pub fn cors_is_permissive(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == CORS_ANY_ORIGIN)
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn validate_jwt_secret(secret: &str) -> AppResult<()> {
    if secret.len() < MIN_JWT_SECRET_LENGTH {
        return Err(AppError::internal(format!(
            "JWT_SECRET must be at least {} characters long",
            MIN_JWT_SECRET_LENGTH
        )));
    }
    Ok(())
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> AppResult<T> {
    value
        .parse()
        .map_err(|_| AppError::internal(format!("{} has an invalid value: {}", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    #[test]
    fn test_new_applies_defaults() {
        let config = Config::new("sqlite::memory:", SECRET).unwrap();

        assert_eq!(config.jwt_expiration_hours, DEFAULT_JWT_EXPIRATION_HOURS);
        assert_eq!(config.payment_currency, "usd");
        assert!(config.cors_is_permissive());
        assert_eq!(config.server_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(Config::new("sqlite::memory:", "short").is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::new("postgres://user:pw@db/app", SECRET)
            .unwrap()
            .with_payment_secret_key("sk_test_123");
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains(SECRET));
        assert!(!rendered.contains("sk_test_123"));
        assert!(!rendered.contains("user:pw"));
    }

    #[test]
    fn test_explicit_origins_are_not_permissive() {
        let mut config = Config::new("sqlite::memory:", SECRET).unwrap();
        config.cors_origins = vec!["https://artistry.example".to_string()];

        assert!(!config.cors_is_permissive());
    }
}
