//! Stripe API client for card payments.
//!
//! A thin wrapper over the PaymentIntents endpoint. Stripe's API is
//! form-encoded on the way in and JSON on the way out; amounts are integers
//! in the smallest currency unit.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::instrument;

use sweet_dessert_core::Money;

use crate::config::StripeConfig;

const STRIPE_API_URL: &str = "https://api.stripe.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Errors that can occur when talking to Stripe.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe returned an error response.
    #[error("Stripe error ({error_type}): {message}")]
    Api {
        /// Error type from Stripe (e.g. `card_error`).
        error_type: String,
        /// Error message.
        message: String,
    },

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// The amount is not chargeable (zero or negative).
    #[error("invalid amount: {0}")]
    InvalidAmount(Money),
}

/// A created or retrieved `PaymentIntent`.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    /// Intent ID (pi_...).
    pub id: String,
    /// Client secret handed to Stripe.js on the frontend.
    pub client_secret: String,
    /// Intent status (e.g. `requires_payment_method`, `succeeded`).
    pub status: String,
    /// Amount in the smallest currency unit.
    pub amount: i64,
    /// Currency code.
    pub currency: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(rename = "type")]
    error_type: String,
    #[serde(default)]
    message: String,
}

/// Stripe API client.
#[derive(Clone)]
pub struct StripeClient {
    inner: Arc<StripeClientInner>,
}

struct StripeClientInner {
    client: reqwest::Client,
    currency: String,
}

impl StripeClient {
    /// Create a new Stripe client.
    ///
    /// # Panics
    ///
    /// Panics if the secret key contains invalid header characters.
    #[must_use]
    pub fn new(config: &StripeConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.secret_key.expose_secret()))
                .expect("Invalid Stripe key for header"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(StripeClientInner {
                client,
                currency: config.currency.clone(),
            }),
        }
    }

    /// Create a card-only `PaymentIntent` for the given amount.
    ///
    /// # Arguments
    ///
    /// * `amount` - The charge amount in the display currency
    /// * `order_number` - Attached as metadata for reconciliation
    /// * `receipt_email` - Optional email for Stripe's receipt
    ///
    /// # Errors
    ///
    /// Returns `StripeError::InvalidAmount` for non-positive amounts, or a
    /// request/API error from Stripe.
    #[instrument(skip(self), fields(order_number = %order_number))]
    pub async fn create_payment_intent(
        &self,
        amount: Money,
        order_number: &str,
        receipt_email: Option<&str>,
    ) -> Result<PaymentIntent, StripeError> {
        if !amount.is_positive() {
            return Err(StripeError::InvalidAmount(amount));
        }

        let amount_minor = amount.minor_units().to_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("amount", &amount_minor),
            ("currency", &self.inner.currency),
            ("payment_method_types[]", "card"),
            ("metadata[order_number]", order_number),
        ];
        if let Some(email) = receipt_email {
            params.push(("receipt_email", email));
        }

        let response = self
            .inner
            .client
            .post(format!("{STRIPE_API_URL}/payment_intents"))
            .form(&params)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Retrieve an existing `PaymentIntent` by ID.
    ///
    /// # Errors
    ///
    /// Returns a request/API error from Stripe.
    #[instrument(skip(self))]
    pub async fn get_payment_intent(&self, intent_id: &str) -> Result<PaymentIntent, StripeError> {
        let response = self
            .inner
            .client
            .get(format!("{STRIPE_API_URL}/payment_intents/{intent_id}"))
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn handle_response(response: reqwest::Response) -> Result<PaymentIntent, StripeError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&body)
                .map_err(|e| StripeError::Parse(format!("Failed to parse intent: {e}")))
        } else if let Ok(error_body) = serde_json::from_str::<ApiErrorBody>(&body) {
            Err(StripeError::Api {
                error_type: error_body.error.error_type,
                message: error_body.error.message,
            })
        } else {
            Err(StripeError::Api {
                error_type: format!("http_{}", status.as_u16()),
                message: body,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_intent_deserialization() {
        let json = r#"{
            "id": "pi_3abc",
            "client_secret": "pi_3abc_secret_xyz",
            "status": "requires_payment_method",
            "amount": 246000,
            "currency": "pkr"
        }"#;

        let intent: PaymentIntent = serde_json::from_str(json).unwrap();
        assert_eq!(intent.id, "pi_3abc");
        assert_eq!(intent.amount, 246_000);
        assert_eq!(intent.status, "requires_payment_method");
    }

    #[test]
    fn test_api_error_deserialization() {
        let json = r#"{
            "error": {
                "type": "invalid_request_error",
                "message": "Amount must be at least 50 cents"
            }
        }"#;

        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.error.error_type, "invalid_request_error");
        assert!(body.error.message.contains("50 cents"));
    }

    #[test]
    fn test_stripe_client_is_clone_send_sync() {
        fn assert_bounds<T: Clone + Send + Sync>() {}
        assert_bounds::<StripeClient>();
    }
}
