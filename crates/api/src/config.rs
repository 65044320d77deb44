//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOP_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `SHOP_BASE_URL` - Public URL for the API
//! - `SHOP_SESSION_SECRET` - Session signing secret (min 32 chars, high entropy)
//! - `STRIPE_SECRET_KEY` - Stripe API secret key
//!
//! ## Optional
//! - `SHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOP_PORT` - Listen port (default: 8000)
//! - `SHOP_FRONTEND_ORIGIN` - Allowed CORS origin for the SPA frontend
//! - `STRIPE_CURRENCY` - ISO currency code for payment intents (default: pkr)
//! - `DELIVERY_FEE` - Flat delivery fee (default: 200)
//! - `FREE_DELIVERY_THRESHOLD` - Subtotal above which delivery is free (default: 2500)
//! - `TAX_RATE` - Tax rate applied to the subtotal (default: 0.05)
//! - `OPENROUTER_API_KEY` - Chat completions key (chat degrades to keyword fallback without it)
//! - `OPENROUTER_BASE_URL` - OpenAI-compatible API base (default: <https://openrouter.ai/api/v1>)
//! - `OPENROUTER_MODEL` - Chat model (default: mistralai/devstral-2512:free)
//! - `OPENROUTER_INTENT_MODEL` - Structured-output intent model (default: same as chat model)
//! - `OPENAI_API_KEY` - Embeddings key (semantic search falls back to keyword scan without it)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - Sentry sampling (0.0 to 1.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use sweet_dessert_core::Money;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_CHAT_MODEL: &str = "mistralai/devstral-2512:free";
const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the API
    pub base_url: String,
    /// Allowed CORS origin for the SPA frontend
    pub frontend_origin: Option<String>,
    /// Session signing secret
    pub session_secret: SecretString,
    /// Delivery fee / tax policy used by checkout
    pub pricing: PricingPolicy,
    /// Stripe configuration
    pub stripe: StripeConfig,
    /// Chat provider configuration (optional - chat degrades without it)
    pub chat: Option<ChatProviderConfig>,
    /// Embeddings configuration (optional - search degrades without it)
    pub embeddings: Option<EmbeddingProviderConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Server-side pricing policy applied at checkout.
///
/// The original system trusted totals computed in the browser; here the
/// server recomputes everything from these knobs and rejects mismatches.
#[derive(Debug, Clone, Copy)]
pub struct PricingPolicy {
    /// Flat delivery fee for delivery orders.
    pub delivery_fee: Money,
    /// Subtotal at or above which delivery is free.
    pub free_delivery_threshold: Money,
    /// Tax rate applied to the subtotal (e.g. 0.05).
    pub tax_rate: Decimal,
}

impl PricingPolicy {
    /// Delivery fee for a given subtotal.
    #[must_use]
    pub fn delivery_fee_for(&self, subtotal: Money) -> Money {
        if subtotal >= self.free_delivery_threshold {
            Money::ZERO
        } else {
            self.delivery_fee
        }
    }

    /// Tax for a given subtotal, rounded to two decimals.
    #[must_use]
    pub fn tax_for(&self, subtotal: Money) -> Money {
        Money::new((subtotal.amount() * self.tax_rate).round_dp(2))
    }
}

/// Stripe API configuration.
///
/// Implements `Debug` manually to redact the secret key.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret key (sk_live_... / sk_test_...)
    pub secret_key: SecretString,
    /// ISO 4217 currency code used for payment intents
    pub currency: String,
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"[REDACTED]")
            .field("currency", &self.currency)
            .finish()
    }
}

/// OpenRouter (OpenAI-compatible) chat provider configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ChatProviderConfig {
    /// Default API key; a per-request key in the chat payload overrides it
    pub api_key: SecretString,
    /// API base URL (OpenAI-compatible)
    pub base_url: String,
    /// Model used for streamed replies
    pub model: String,
    /// Model used for structured intent classification
    pub intent_model: String,
}

impl std::fmt::Debug for ChatProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatProviderConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("intent_model", &self.intent_model)
            .finish()
    }
}

/// Embeddings provider configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct EmbeddingProviderConfig {
    /// `OpenAI` API key for embeddings
    pub api_key: SecretString,
}

impl std::fmt::Debug for EmbeddingProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingProviderConfig")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("SHOP_DATABASE_URL")?;
        let host = get_env_or_default("SHOP_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOP_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SHOP_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOP_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("SHOP_BASE_URL")?;
        let frontend_origin = get_optional_env("SHOP_FRONTEND_ORIGIN");

        let session_secret = get_required_secret("SHOP_SESSION_SECRET")?;
        validate_session_secret(&session_secret, "SHOP_SESSION_SECRET")?;
        validate_secret_strength(session_secret.expose_secret(), "SHOP_SESSION_SECRET")?;

        let pricing = PricingPolicy::from_env()?;
        let stripe = StripeConfig::from_env()?;
        let chat = ChatProviderConfig::from_env();
        let embeddings = get_optional_env("OPENAI_API_KEY").map(|key| EmbeddingProviderConfig {
            api_key: SecretString::from(key),
        });

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_rate("SENTRY_SAMPLE_RATE", 1.0)?;
        let sentry_traces_sample_rate = parse_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            frontend_origin,
            session_secret,
            pricing,
            stripe,
            chat,
            embeddings,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl PricingPolicy {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            delivery_fee: Money::new(parse_decimal("DELIVERY_FEE", "200")?),
            free_delivery_threshold: Money::new(parse_decimal("FREE_DELIVERY_THRESHOLD", "2500")?),
            tax_rate: parse_decimal("TAX_RATE", "0.05")?,
        })
    }
}

impl StripeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret_key: get_required_secret("STRIPE_SECRET_KEY")?,
            currency: get_env_or_default("STRIPE_CURRENCY", "pkr"),
        })
    }
}

impl ChatProviderConfig {
    fn from_env() -> Option<Self> {
        let api_key = get_optional_env("OPENROUTER_API_KEY")?;
        let model = get_env_or_default("OPENROUTER_MODEL", DEFAULT_CHAT_MODEL);
        Some(Self {
            api_key: SecretString::from(api_key),
            base_url: get_env_or_default("OPENROUTER_BASE_URL", DEFAULT_OPENROUTER_BASE_URL),
            intent_model: get_env_or_default("OPENROUTER_INTENT_MODEL", &model),
            model,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a decimal-valued environment variable with a default.
fn parse_decimal(key: &str, default: &str) -> Result<Decimal, ConfigError> {
    get_env_or_default(key, default)
        .parse::<Decimal>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sampling rate (0.0 to 1.0) with a default.
fn parse_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    match std::env::var(key) {
        Ok(value) => {
            let rate = value
                .parse::<f32>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::InvalidEnvVar(
                    key.to_string(),
                    "must be between 0.0 and 1.0".to_string(),
                ));
            }
            Ok(rate)
        }
        Err(_) => Ok(default),
    }
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        Money::new(s.parse().unwrap())
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_high() {
        let entropy = shannon_entropy("aB3$xY9!mK2@nL5#");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-api-key-here", "TEST_VAR");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InsecureSecret(_, _)
        ));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_session_secret_too_short() {
        let secret = SecretString::from("short");
        assert!(validate_session_secret(&secret, "TEST_SESSION").is_err());
    }

    #[test]
    fn test_validate_session_secret_valid_length() {
        let secret = SecretString::from("a".repeat(32));
        assert!(validate_session_secret(&secret, "TEST_SESSION").is_ok());
    }

    #[test]
    fn test_pricing_delivery_fee_waived_above_threshold() {
        let pricing = PricingPolicy {
            delivery_fee: money("200"),
            free_delivery_threshold: money("2500"),
            tax_rate: "0.05".parse().unwrap(),
        };

        assert_eq!(pricing.delivery_fee_for(money("2499.99")), money("200"));
        assert_eq!(pricing.delivery_fee_for(money("2500")), Money::ZERO);
        assert_eq!(pricing.delivery_fee_for(money("3000")), Money::ZERO);
    }

    #[test]
    fn test_pricing_tax_rounds_to_two_decimals() {
        let pricing = PricingPolicy {
            delivery_fee: money("200"),
            free_delivery_threshold: money("2500"),
            tax_rate: "0.05".parse().unwrap(),
        };

        assert_eq!(pricing.tax_for(money("999.99")), money("50.00"));
        assert_eq!(pricing.tax_for(money("100")), money("5.00"));
    }

    #[test]
    fn test_stripe_config_debug_redacts_secret() {
        let config = StripeConfig {
            secret_key: SecretString::from("sk_test_abc123"),
            currency: "pkr".to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("sk_test_abc123"));
        assert!(debug_output.contains("pkr"));
    }

    #[test]
    fn test_chat_config_debug_redacts_key() {
        let config = ChatProviderConfig {
            api_key: SecretString::from("sk-or-v1-xyz"),
            base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            intent_model: DEFAULT_CHAT_MODEL.to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("sk-or-v1-xyz"));
    }
}
