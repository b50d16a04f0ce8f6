//! Billing API port for read-only access to the subscription provider.
//!
//! Defines the transport contract the entitlement resolvers depend on.
//! Implementations issue one authenticated GET per call and hand back the
//! parsed JSON body.
//!
//! # Design
//!
//! - **Read-only**: only list endpoints are needed
//! - **Explicit credential**: the key travels with every call, nothing is held
//! - **No retries**: a failed call is reported once and the caller decides

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::billing::Credential;

/// Port for the billing provider's HTTP API.
#[async_trait]
pub trait BillingApi: Send + Sync {
    /// GET `resource` with `query` as the URL query string.
    ///
    /// Returns the parsed response body. Transport failures, non-2xx
    /// statuses, bodies carrying an `error` object, and unparseable bodies
    /// are all reported as `Err`.
    async fn request(
        &self,
        resource: BillingResource,
        query: &[(&str, &str)],
        credential: &Credential,
    ) -> Result<serde_json::Value, BillingError>;
}

/// List resources exposed by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingResource {
    Plans,
    Customers,
    Subscriptions,
}

impl BillingResource {
    /// Path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            BillingResource::Plans => "/plans",
            BillingResource::Customers => "/customers",
            BillingResource::Subscriptions => "/subscriptions",
        }
    }
}

impl std::fmt::Display for BillingResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BillingResource::Plans => "plans",
            BillingResource::Customers => "customers",
            BillingResource::Subscriptions => "subscriptions",
        };
        write!(f, "{}", s)
    }
}

/// Request a list resource and decode its `data` array.
///
/// A body without a `data` array, or with entries that do not decode as `T`,
/// is reported as a malformed response.
pub async fn list<T: DeserializeOwned>(
    api: &dyn BillingApi,
    resource: BillingResource,
    query: &[(&str, &str)],
    credential: &Credential,
) -> Result<Vec<T>, BillingError> {
    let mut body = api.request(resource, query, credential).await?;

    let data = match body.get_mut("data") {
        Some(data) if data.is_array() => data.take(),
        _ => {
            return Err(BillingError::malformed(format!(
                "{} response has no data array",
                resource
            )))
        }
    };

    serde_json::from_value(data).map_err(|e| {
        BillingError::malformed(format!("Invalid {} entry: {}", resource, e))
    })
}

/// Errors from billing provider calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingError {
    /// Error code for categorization.
    pub code: BillingErrorCode,

    /// Human-readable message.
    pub message: String,

    /// HTTP status, when a response was received.
    pub status: Option<u16>,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,
}

impl BillingError {
    /// Create a new billing error.
    pub fn new(code: BillingErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            provider_code: None,
        }
    }

    /// Attach the HTTP status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach the provider's error code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::NetworkError, message)
    }

    /// Create a provider error from an HTTP status.
    ///
    /// 401/403 map to `AuthenticationError` and 429 to `RateLimited`.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let code = match status {
            401 | 403 => BillingErrorCode::AuthenticationError,
            429 => BillingErrorCode::RateLimited,
            _ => BillingErrorCode::ProviderError,
        };
        Self::new(code, message).with_status(status)
    }

    /// Create a malformed response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::MalformedResponse, message)
    }

    /// Whether the failure happened before any response was received.
    pub fn is_transport(&self) -> bool {
        self.code == BillingErrorCode::NetworkError
    }
}

impl std::fmt::Display for BillingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({}): {}", self.code, status, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for BillingError {}

/// Billing error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingErrorCode {
    /// Provider could not be reached.
    NetworkError,

    /// Credential rejected.
    AuthenticationError,

    /// Rate limit exceeded.
    RateLimited,

    /// Non-2xx status or `error` body.
    ProviderError,

    /// Body could not be parsed.
    MalformedResponse,
}

impl std::fmt::Display for BillingErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BillingErrorCode::NetworkError => "network_error",
            BillingErrorCode::AuthenticationError => "authentication_error",
            BillingErrorCode::RateLimited => "rate_limited",
            BillingErrorCode::ProviderError => "provider_error",
            BillingErrorCode::MalformedResponse => "malformed_response",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct CannedApi(Result<serde_json::Value, BillingError>);

    #[async_trait]
    impl BillingApi for CannedApi {
        async fn request(
            &self,
            _resource: BillingResource,
            _query: &[(&str, &str)],
            _credential: &Credential,
        ) -> Result<serde_json::Value, BillingError> {
            self.0.clone()
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    // Trait object safety test
    #[test]
    fn billing_api_is_object_safe() {
        fn _accepts_dyn(_api: &dyn BillingApi) {}
    }

    #[test]
    fn resource_paths() {
        assert_eq!(BillingResource::Plans.path(), "/plans");
        assert_eq!(BillingResource::Customers.path(), "/customers");
        assert_eq!(BillingResource::Subscriptions.path(), "/subscriptions");
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            BillingError::from_status(401, "bad key").code,
            BillingErrorCode::AuthenticationError
        );
        assert_eq!(
            BillingError::from_status(429, "slow down").code,
            BillingErrorCode::RateLimited
        );
        let err = BillingError::from_status(500, "boom");
        assert_eq!(err.code, BillingErrorCode::ProviderError);
        assert_eq!(err.status, Some(500));
    }

    #[test]
    fn billing_error_display() {
        let err = BillingError::from_status(404, "No such customer");
        assert_eq!(err.to_string(), "provider_error (404): No such customer");

        let err = BillingError::network("connection refused");
        assert_eq!(err.to_string(), "network_error: connection refused");
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn list_decodes_data_array() {
        let api = CannedApi(Ok(json!({
            "object": "list",
            "data": [{"id": "a"}, {"id": "b"}],
            "has_more": false
        })));

        let items: Vec<Item> = list(&api, BillingResource::Customers, &[], &Credential::new("k"))
            .await
            .unwrap();

        assert_eq!(
            items,
            vec![Item { id: "a".to_string() }, Item { id: "b".to_string() }]
        );
    }

    #[tokio::test]
    async fn list_rejects_missing_data() {
        let api = CannedApi(Ok(json!({"object": "list"})));

        let result: Result<Vec<Item>, _> =
            list(&api, BillingResource::Plans, &[], &Credential::new("k")).await;

        assert_eq!(result.unwrap_err().code, BillingErrorCode::MalformedResponse);
    }

    #[tokio::test]
    async fn list_rejects_bad_entries() {
        let api = CannedApi(Ok(json!({"data": [{"name": "no id"}]})));

        let result: Result<Vec<Item>, _> =
            list(&api, BillingResource::Plans, &[], &Credential::new("k")).await;

        let err = result.unwrap_err();
        assert_eq!(err.code, BillingErrorCode::MalformedResponse);
        assert!(err.message.contains("plans"));
    }

    #[tokio::test]
    async fn list_passes_errors_through() {
        let api = CannedApi(Err(BillingError::network("down")));

        let result: Result<Vec<Item>, _> =
            list(&api, BillingResource::Customers, &[], &Credential::new("k")).await;

        assert!(result.unwrap_err().is_transport());
    }
}
