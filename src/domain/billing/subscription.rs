//! Subscription records and lifecycle status.

use serde::{Deserialize, Serialize};

/// Subscription lifecycle status as reported by the billing provider.
///
/// Statuses this crate does not recognise are kept verbatim in `Unknown`
/// instead of failing the parse, so new provider states never break lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionStatus {
    /// Subscription is paid and current.
    Active,

    /// Subscription is in its trial period.
    Trialing,

    /// Latest payment failed; provider is retrying.
    PastDue,

    /// Subscription was canceled.
    Canceled,

    /// Initial payment has not completed.
    Incomplete,

    /// Initial payment never completed and the subscription lapsed.
    IncompleteExpired,

    /// Retries exhausted, invoices left unpaid.
    Unpaid,

    /// Subscription is paused.
    Paused,

    /// Status string not known to this crate.
    Unknown(String),
}

impl SubscriptionStatus {
    /// Parse the provider's status string.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "active" => SubscriptionStatus::Active,
            "trialing" => SubscriptionStatus::Trialing,
            "past_due" => SubscriptionStatus::PastDue,
            "canceled" => SubscriptionStatus::Canceled,
            "incomplete" => SubscriptionStatus::Incomplete,
            "incomplete_expired" => SubscriptionStatus::IncompleteExpired,
            "unpaid" => SubscriptionStatus::Unpaid,
            "paused" => SubscriptionStatus::Paused,
            other => SubscriptionStatus::Unknown(other.to_string()),
        }
    }

    /// Provider's wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Incomplete => "incomplete",
            SubscriptionStatus::IncompleteExpired => "incomplete_expired",
            SubscriptionStatus::Unpaid => "unpaid",
            SubscriptionStatus::Paused => "paused",
            SubscriptionStatus::Unknown(raw) => raw,
        }
    }

    /// Check if the status counts toward a paid entitlement.
    ///
    /// Only `active` and `trialing` qualify; `past_due` does not.
    pub fn grants_entitlement(&self) -> bool {
        matches!(
            self,
            SubscriptionStatus::Active | SubscriptionStatus::Trialing
        )
    }
}

impl From<String> for SubscriptionStatus {
    fn from(raw: String) -> Self {
        SubscriptionStatus::parse(&raw)
    }
}

impl From<SubscriptionStatus> for String {
    fn from(status: SubscriptionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A customer's subscription, reduced to what entitlement checks need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    /// Provider's subscription ID (sub_...), when the provider sent one.
    pub id: Option<String>,

    /// Lifecycle status at lookup time.
    pub status: SubscriptionStatus,

    /// Price the subscription bills against (price_...).
    ///
    /// `None` when the provider sent neither items nor a legacy plan.
    pub price_id: Option<String>,

    /// Product that price belongs to (prod_...).
    pub product_id: Option<String>,
}

impl SubscriptionRecord {
    pub fn new(
        status: SubscriptionStatus,
        price_id: impl Into<String>,
        product_id: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            status,
            price_id: Some(price_id.into()),
            product_id: Some(product_id.into()),
        }
    }

    /// A subscription the provider listed without any price.
    pub fn unpriced(status: SubscriptionStatus) -> Self {
        Self {
            id: None,
            status,
            price_id: None,
            product_id: None,
        }
    }

    pub fn is_for_product(&self, product_id: &str) -> bool {
        self.product_id.as_deref() == Some(product_id)
    }

    pub fn bills_price(&self, price_id: &str) -> bool {
        self.price_id.as_deref() == Some(price_id)
    }

    /// Attach the provider's subscription ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
