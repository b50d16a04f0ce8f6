//! Mock billing API for testing.
//!
//! Provides an in-memory implementation of `BillingApi` that renders
//! Stripe-shaped list responses. Supports:
//! - Pre-configured customers, subscriptions and plans
//! - Error injection per resource or for the next call
//! - Raw response overrides
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::billing::{Credential, CustomerRecord, PlanRecord, SubscriptionRecord};
use crate::ports::{BillingApi, BillingError, BillingResource};

/// Mock billing API for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockBillingApi::new();
/// mock.add_customer(CustomerRecord::new("cus_1", "ada@example.com"));
/// mock.add_subscription("cus_1", SubscriptionRecord::new(SubscriptionStatus::Active, "price_A", "prod_A"));
///
/// // Inject errors
/// mock.set_resource_error(BillingResource::Subscriptions, BillingError::network("down"));
/// ```
#[derive(Default)]
pub struct MockBillingApi {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

/// Internal mutable state.
#[derive(Default)]
struct MockState {
    /// Customers by email, in listing order.
    customers: HashMap<String, Vec<CustomerRecord>>,

    /// Subscriptions by customer ID, in listing order.
    subscriptions: HashMap<String, Vec<SubscriptionRecord>>,

    /// Plans in listing order.
    plans: Vec<PlanRecord>,

    /// Raw bodies returned instead of the rendered list.
    raw_responses: HashMap<BillingResource, Value>,

    /// Error to return on next call.
    next_error: Option<BillingError>,

    /// Errors returned for every call to a resource.
    resource_errors: HashMap<BillingResource, BillingError>,

    /// Track requests for assertions.
    call_log: Vec<RecordedRequest>,
}

/// Recorded request for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub resource: BillingResource,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of a query parameter, if sent.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl MockBillingApi {
    /// Create an empty mock: no customers, no subscriptions, no plans.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails every call with a transport error.
    pub fn unreachable() -> Self {
        let mock = Self::new();
        for resource in [
            BillingResource::Plans,
            BillingResource::Customers,
            BillingResource::Subscriptions,
        ] {
            mock.set_resource_error(resource, BillingError::network("connection refused"));
        }
        mock
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Add a customer, listed after any others sharing its email.
    pub fn add_customer(&self, customer: CustomerRecord) {
        self.state()
            .customers
            .entry(customer.email.clone())
            .or_default()
            .push(customer);
    }

    /// Add a subscription for a customer, listed after existing ones.
    pub fn add_subscription(&self, customer_id: &str, subscription: SubscriptionRecord) {
        self.state()
            .subscriptions
            .entry(customer_id.to_string())
            .or_default()
            .push(subscription);
    }

    /// Replace all subscriptions of a customer.
    pub fn set_subscriptions(&self, customer_id: &str, subscriptions: Vec<SubscriptionRecord>) {
        self.state()
            .subscriptions
            .insert(customer_id.to_string(), subscriptions);
    }

    /// Add a plan to the catalog.
    pub fn add_plan(&self, plan: PlanRecord) {
        self.state().plans.push(plan);
    }

    /// Return `body` verbatim for every call to `resource`.
    pub fn set_raw_response(&self, resource: BillingResource, body: Value) {
        self.state().raw_responses.insert(resource, body);
    }

    /// Set an error to return on the next call to any resource.
    pub fn set_error(&self, error: BillingError) {
        self.state().next_error = Some(error);
    }

    /// Set an error for every call to a resource.
    pub fn set_resource_error(&self, resource: BillingResource, error: BillingError) {
        self.state().resource_errors.insert(resource, error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.state();
        state.next_error = None;
        state.resource_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Get all recorded requests.
    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.state().call_log.clone()
    }

    /// Check if a resource was requested.
    pub fn was_called(&self, resource: BillingResource) -> bool {
        self.state().call_log.iter().any(|c| c.resource == resource)
    }

    /// Get count of requests to a resource.
    pub fn call_count(&self, resource: BillingResource) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.resource == resource)
            .count()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.state().call_log.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn check_error(state: &mut MockState, resource: BillingResource) -> Result<(), BillingError> {
        // Check resource-specific error first
        if let Some(error) = state.resource_errors.get(&resource) {
            return Err(error.clone());
        }

        // Check global error (consumes it)
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

impl Clone for MockBillingApi {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

fn param<'a>(query: &[(&str, &'a str)], key: &str) -> Option<&'a str> {
    query.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn list_envelope(data: Vec<Value>) -> Value {
    json!({
        "object": "list",
        "data": data,
        "has_more": false,
    })
}

fn customer_json(customer: &CustomerRecord) -> Value {
    json!({
        "id": customer.id,
        "object": "customer",
        "email": customer.email,
    })
}

fn subscription_json(customer_id: &str, subscription: &SubscriptionRecord) -> Value {
    let items: Vec<Value> = match (&subscription.price_id, &subscription.product_id) {
        (Some(price_id), Some(product_id)) => vec![json!({
            "object": "subscription_item",
            "price": { "id": price_id, "product": product_id },
        })],
        _ => Vec::new(),
    };

    json!({
        "id": subscription.id,
        "object": "subscription",
        "customer": customer_id,
        "status": subscription.status.as_str(),
        "items": { "object": "list", "data": items },
    })
}

fn plan_json(plan: &PlanRecord) -> Value {
    json!({
        "id": plan.price_id,
        "object": "plan",
        "amount": plan.amount,
        "currency": plan.currency,
        "interval": plan.interval.as_str(),
        "interval_count": plan.interval_count,
        "product": plan.product_id,
    })
}

#[async_trait]
impl BillingApi for MockBillingApi {
    async fn request(
        &self,
        resource: BillingResource,
        query: &[(&str, &str)],
        _credential: &Credential,
    ) -> Result<Value, BillingError> {
        let mut state = self.state();

        state.call_log.push(RecordedRequest {
            resource,
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
        Self::check_error(&mut state, resource)?;

        if let Some(body) = state.raw_responses.get(&resource) {
            return Ok(body.clone());
        }

        let data = match resource {
            BillingResource::Customers => param(query, "email")
                .and_then(|email| state.customers.get(email))
                .map(|customers| customers.iter().map(customer_json).collect())
                .unwrap_or_default(),
            BillingResource::Subscriptions => param(query, "customer")
                .and_then(|id| state.subscriptions.get(id).map(|subs| (id, subs)))
                .map(|(id, subs)| subs.iter().map(|s| subscription_json(id, s)).collect())
                .unwrap_or_default(),
            BillingResource::Plans => state.plans.iter().map(plan_json).collect(),
        };

        Ok(list_envelope(data))
    }
}
