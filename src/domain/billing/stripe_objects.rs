//! Stripe list-object types.
//!
//! Captures only the fields entitlement checks read from the `customers`,
//! `subscriptions` and `plans` list endpoints. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

use super::{BillingInterval, CustomerRecord, PlanRecord, SubscriptionRecord, SubscriptionStatus};

/// Reference to another object: a bare ID, or the object itself when expanded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum StripeExpandable {
    Id(String),
    Object { id: String },
}

impl StripeExpandable {
    pub fn id(&self) -> &str {
        match self {
            StripeExpandable::Id(id) => id,
            StripeExpandable::Object { id } => id,
        }
    }
}

/// Stripe Customer object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeCustomer {
    /// Unique customer identifier (cus_...).
    pub id: String,

    /// Customer email address.
    pub email: Option<String>,
}

impl StripeCustomer {
    /// Convert to a domain record, falling back to the email it was looked up by.
    pub fn into_record(self, queried_email: &str) -> CustomerRecord {
        let email = self
            .email
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| queried_email.to_string());
        CustomerRecord::new(self.id, email)
    }
}

/// Stripe Subscription object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeSubscription {
    /// Unique subscription identifier (sub_...).
    pub id: Option<String>,

    /// Subscription status.
    pub status: String,

    /// Subscription items (price/quantity pairs).
    #[serde(default)]
    pub items: StripeSubscriptionItems,

    /// Legacy single-plan field, still sent for single-item subscriptions.
    pub plan: Option<StripePrice>,
}

/// Subscription items container.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StripeSubscriptionItems {
    #[serde(default)]
    pub data: Vec<StripeSubscriptionItem>,
}

/// Single subscription item.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeSubscriptionItem {
    pub price: StripePrice,
}

/// Price (or legacy plan) reference embedded in a subscription.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripePrice {
    /// Price ID.
    pub id: String,

    /// Product this price is for.
    pub product: StripeExpandable,
}

impl StripeSubscription {
    /// Price billed by this subscription.
    ///
    /// Uses the first item's price; falls back to the legacy `plan` object.
    pub fn price(&self) -> Option<&StripePrice> {
        self.items
            .data
            .first()
            .map(|item| &item.price)
            .or(self.plan.as_ref())
    }

    /// Convert to a domain record.
    ///
    /// A subscription carrying no price at all keeps empty price and product.
    pub fn into_record(self) -> SubscriptionRecord {
        let status = SubscriptionStatus::parse(&self.status);
        let record = match self.price() {
            Some(price) => SubscriptionRecord::new(status, price.id.clone(), price.product.id()),
            None => SubscriptionRecord::unpriced(status),
        };
        match self.id {
            Some(id) => record.with_id(id),
            None => record,
        }
    }
}

/// Stripe Plan object from the `plans` list endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripePlan {
    /// Plan (price) ID.
    pub id: String,

    /// Amount in cents; absent for tiered pricing.
    pub amount: Option<i64>,

    /// Currency (lowercase).
    pub currency: String,

    pub interval: BillingInterval,

    #[serde(default = "default_interval_count")]
    pub interval_count: u32,

    /// Product this plan is for.
    pub product: StripeExpandable,
}

fn default_interval_count() -> u32 {
    1
}

impl StripePlan {
    /// Convert to a domain record. Tiered plans keep an empty amount.
    pub fn into_record(self) -> PlanRecord {
        PlanRecord {
            amount: self.amount,
            currency: self.currency,
            product_id: self.product.id().to_string(),
            price_id: self.id,
            interval_count: self.interval_count,
            interval: self.interval,
        }
    }
}

/// Error envelope returned by Stripe on failure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeErrorBody {
    pub error: StripeErrorDetail,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StripeErrorDetail {
    /// Human-readable message.
    pub message: Option<String>,

    /// Machine-readable code (e.g. "resource_missing").
    pub code: Option<String>,

    /// Error category (e.g. "invalid_request_error").
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn customer_uses_own_email() {
        let customer: StripeCustomer = serde_json::from_value(json!({
            "id": "cus_1",
            "object": "customer",
            "email": "Ada@Example.com"
        }))
        .unwrap();

        let record = customer.into_record("ada@example.com");
        assert_eq!(record, CustomerRecord::new("cus_1", "Ada@Example.com"));
    }

    #[test]
    fn customer_without_email_falls_back_to_query() {
        let customer: StripeCustomer =
            serde_json::from_value(json!({"id": "cus_1", "email": null})).unwrap();

        assert_eq!(customer.into_record("ada@example.com").email, "ada@example.com");
    }

    #[test]
    fn subscription_reads_first_item_price() {
        let sub: StripeSubscription = serde_json::from_value(json!({
            "id": "sub_1",
            "object": "subscription",
            "status": "active",
            "items": {
                "object": "list",
                "data": [
                    {"id": "si_1", "price": {"id": "price_A", "product": "prod_A"}},
                    {"id": "si_2", "price": {"id": "price_B", "product": "prod_B"}}
                ]
            }
        }))
        .unwrap();

        let record = sub.into_record();
        assert_eq!(record.id.as_deref(), Some("sub_1"));
        assert_eq!(record.status, SubscriptionStatus::Active);
        assert_eq!(record.price_id.as_deref(), Some("price_A"));
        assert_eq!(record.product_id.as_deref(), Some("prod_A"));
    }

    #[test]
    fn subscription_falls_back_to_legacy_plan() {
        let sub: StripeSubscription = serde_json::from_value(json!({
            "id": "sub_1",
            "status": "canceled",
            "plan": {"id": "plan_X", "product": {"id": "prod_X", "object": "product"}}
        }))
        .unwrap();

        let record = sub.into_record();
        assert_eq!(record.status, SubscriptionStatus::Canceled);
        assert_eq!(record.price_id.as_deref(), Some("plan_X"));
        assert_eq!(record.product_id.as_deref(), Some("prod_X"));
    }

    #[test]
    fn subscription_without_price_keeps_empty_price() {
        let sub: StripeSubscription = serde_json::from_value(
            json!({"id": "sub_1", "status": "active", "items": {"data": []}}),
        )
        .unwrap();

        let record = sub.into_record();
        assert_eq!(record.id.as_deref(), Some("sub_1"));
        assert_eq!(record.price_id, None);
        assert_eq!(record.product_id, None);
    }

    #[test]
    fn plan_maps_to_record() {
        let plan: StripePlan = serde_json::from_value(json!({
            "id": "price_1",
            "object": "plan",
            "amount": 1000,
            "currency": "usd",
            "interval": "month",
            "interval_count": 1,
            "product": "prod_1"
        }))
        .unwrap();

        let record = plan.into_record();
        assert_eq!(record.amount, Some(1000));
        assert_eq!(record.price_id, "price_1");
        assert_eq!(record.product_id, "prod_1");
        assert_eq!(record.period(), "1 month");
    }

    #[test]
    fn tiered_plan_keeps_empty_amount() {
        let plan: StripePlan = serde_json::from_value(json!({
            "id": "price_tiered",
            "amount": null,
            "currency": "usd",
            "interval": "year",
            "product": "prod_1"
        }))
        .unwrap();

        let record = plan.into_record();
        assert_eq!(record.amount, None);
        assert_eq!(record.period(), "1 year");
    }

    #[test]
    fn error_body_parses() {
        let body: StripeErrorBody = serde_json::from_value(json!({
            "error": {
                "message": "Invalid API Key provided: sk_test_****",
                "type": "invalid_request_error"
            }
        }))
        .unwrap();

        assert_eq!(body.error.kind.as_deref(), Some("invalid_request_error"));
        assert!(body.error.message.unwrap().starts_with("Invalid API Key"));
        assert!(body.error.code.is_none());
    }
}
