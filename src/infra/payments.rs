//! Payment provider client.
//!
//! Talks to a Stripe-compatible `payment_intents` endpoint. Only transport,
//! authentication and response decoding live here; amount validation happens
//! in the payment service before a request is ever made.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::{Config, PAYMENT_METHOD_CARD, PAYMENT_REQUEST_TIMEOUT_SECONDS};
use crate::domain::PaymentIntent;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Charge authorization provider.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a card payment intent for `amount_minor` units of `currency`.
    async fn create_payment_intent(&self, amount_minor: i64, currency: &str)
        -> AppResult<PaymentIntent>;
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: String,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderError,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    message: Option<String>,
}

/// reqwest-backed gateway for the Stripe REST API.
pub struct StripeGateway {
    client: Client,
    endpoint: String,
    secret_key: String,
}

impl StripeGateway {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(PAYMENT_REQUEST_TIMEOUT_SECONDS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: intents_endpoint(&config.payment_api_base),
            secret_key: config.payment_secret_key().to_string(),
        })
    }
}

fn intents_endpoint(base: &str) -> String {
    format!("{}/v1/payment_intents", base.trim_end_matches('/'))
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> AppResult<PaymentIntent> {
        if self.secret_key.is_empty() {
            return Err(AppError::payment("Payment provider is not configured"));
        }

        let amount = amount_minor.to_string();
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.secret_key)
            .form(&[
                ("amount", amount.as_str()),
                ("currency", currency),
                ("payment_method_types[]", PAYMENT_METHOD_CARD),
            ])
            .send()
            .await
            .map_err(|e| AppError::payment(format!("Payment provider unreachable: {}", e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::payment(format!("Failed to read provider response: {}", e)))?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ProviderErrorBody>(&body)
                .ok()
                .and_then(|b| b.error.message)
                .unwrap_or_else(|| status.to_string());
            tracing::warn!(%status, "Payment provider rejected intent: {}", detail);
            return Err(AppError::payment(detail));
        }

        let intent: IntentResponse = serde_json::from_slice(&body)
            .map_err(|e| AppError::payment(format!("Invalid provider response: {}", e)))?;
        let client_secret = intent
            .client_secret
            .ok_or_else(|| AppError::payment("Provider response has no client secret"))?;

        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intents_endpoint_trims_trailing_slash() {
        assert_eq!(
            intents_endpoint("https://api.stripe.com/"),
            "https://api.stripe.com/v1/payment_intents"
        );
        assert_eq!(
            intents_endpoint("http://localhost:12111"),
            "http://localhost:12111/v1/payment_intents"
        );
    }

    #[tokio::test]
    async fn test_unconfigured_gateway_fails_without_request() {
        let config = Config::new("postgres://localhost/test", "x".repeat(32)).unwrap();
        let gateway = StripeGateway::new(&config).unwrap();

        let result = gateway.create_payment_intent(4999, "usd").await;
        assert!(matches!(result, Err(AppError::Payment(_))));
    }
}
