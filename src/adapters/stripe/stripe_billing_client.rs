//! Stripe billing API client.
//!
//! Implements the `BillingApi` port over Stripe's REST API with `reqwest`.
//! Each call is a single authenticated GET; the secret key is sent as the
//! HTTP Basic username with no password.
//!
//! # Configuration
//!
//! ```ignore
//! let client = StripeBillingClient::new(StripeConfig::default());
//! let body = client
//!     .request(BillingResource::Customers, &[("email", "ada@example.com")], &credential)
//!     .await?;
//! ```

use async_trait::async_trait;

use crate::domain::billing::{Credential, StripeErrorBody};
use crate::ports::{BillingApi, BillingError, BillingResource};

/// Default Stripe API base URL, including the version segment.
pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com/v1";

/// Stripe API configuration.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Base URL for the Stripe API (default: https://api.stripe.com/v1).
    api_base_url: String,
}

impl StripeConfig {
    /// Create a configuration against the given base URL.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
        }
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Full URL for a resource.
    fn url_for(&self, resource: BillingResource) -> String {
        format!(
            "{}{}",
            self.api_base_url.trim_end_matches('/'),
            resource.path()
        )
    }
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

/// Stripe billing API client.
///
/// Holds no credential; the caller supplies one on every request. The
/// underlying `reqwest::Client` is shared across calls and uses the
/// transport's default timeouts.
pub struct StripeBillingClient {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripeBillingClient {
    /// Create a new client with the given configuration.
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

/// Build a provider error from an error envelope, if the body carries one.
fn provider_error(status: u16, body: &str) -> BillingError {
    let detail = serde_json::from_str::<StripeErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_default();

    let message = detail
        .message
        .unwrap_or_else(|| format!("Stripe API returned HTTP {}", status));

    let error = BillingError::from_status(status, message);
    match detail.code.or(detail.kind) {
        Some(code) => error.with_provider_code(code),
        None => error,
    }
}

#[async_trait]
impl BillingApi for StripeBillingClient {
    async fn request(
        &self,
        resource: BillingResource,
        query: &[(&str, &str)],
        credential: &Credential,
    ) -> Result<serde_json::Value, BillingError> {
        let url = self.config.url_for(resource);
        tracing::debug!(%resource, params = query.len(), "Stripe API request");

        let response = self
            .http_client
            .get(&url)
            .basic_auth(credential.expose(), Option::<&str>::None)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                // Query strings carry customer emails; keep them out of logs.
                let e = e.without_url();
                tracing::warn!(%resource, error = %e, "Stripe API unreachable");
                BillingError::network(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            tracing::warn!(%resource, error = %e, "Failed to read Stripe response body");
            BillingError::network(e.to_string())
        })?;

        if !status.is_success() {
            let error = provider_error(status.as_u16(), &body);
            tracing::warn!(
                %resource,
                status = status.as_u16(),
                error = %error,
                "Stripe API request failed"
            );
            return Err(error);
        }

        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(%resource, error = %e, "Failed to parse Stripe response");
            BillingError::malformed(format!("Failed to parse Stripe response: {}", e))
        })?;

        if value.get("error").is_some() {
            let error = provider_error(status.as_u16(), &body);
            tracing::warn!(%resource, error = %error, "Stripe response carried an error");
            return Err(error);
        }

        tracing::debug!(%resource, status = status.as_u16(), "Stripe API response");
        Ok(value)
    }
}
