//! EntitlementEvaluator - decides whether a customer holds a paid plan.
//!
//! Every check follows the same path: resolve the customer by email, list
//! their subscriptions, then decide. The two lookups run strictly in
//! sequence and the second is skipped when the first finds nothing.
//!
//! # Status semantics
//!
//! The boolean checks (`has_plan`, `has_plan_with_product`,
//! `has_plan_with_price`) look only at whether a subscription exists and what
//! it is for. A canceled subscription satisfies them. `resolve_entitlement`
//! and `evaluate` additionally require the first subscription to be active
//! or trialing. Both behaviours are kept deliberately distinct.
//!
//! # Failures
//!
//! The four checks never return an error: an unreachable or failing provider
//! reads as "not subscribed". Use `evaluate` to tell the two apart and pick a
//! `FailurePolicy`.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::billing::{Credential, EntitlementResult, SubscriptionRecord};
use crate::ports::{BillingApi, BillingError};

use super::{CustomerResolver, Lookup, SubscriptionResolver};

/// How to treat an entitlement that could not be verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Deny when the provider cannot be asked.
    #[default]
    FailClosed,

    /// Allow when the provider cannot be asked.
    FailOpen,
}

/// Entitlement outcome that keeps provider failures visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EntitlementDecision {
    /// The provider answered; the result is authoritative.
    Verified(EntitlementResult),

    /// The provider could not be asked.
    Unverified { error: BillingError },
}

impl EntitlementDecision {
    /// The entitlement, with unverified decisions read as "none".
    pub fn into_result(self) -> EntitlementResult {
        match self {
            EntitlementDecision::Verified(result) => result,
            EntitlementDecision::Unverified { .. } => EntitlementResult::none(),
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, EntitlementDecision::Verified(_))
    }

    /// Whether access should be granted under `policy`.
    pub fn allows(&self, policy: FailurePolicy) -> bool {
        match self {
            EntitlementDecision::Verified(result) => result.has_plan(),
            EntitlementDecision::Unverified { .. } => policy == FailurePolicy::FailOpen,
        }
    }
}

/// Everything one customer lookup can answer.
///
/// Built from a single customer and subscription fetch, so the decision and
/// the product and price matches always agree with each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitlementSnapshot {
    subscriptions: Lookup<Vec<SubscriptionRecord>>,
}

impl EntitlementSnapshot {
    fn first_subscription(&self) -> Option<&SubscriptionRecord> {
        match &self.subscriptions {
            Lookup::Found(subscriptions) => subscriptions.first(),
            Lookup::NotFound | Lookup::ProviderError(_) => None,
        }
    }

    /// Any subscription record, whatever its status.
    pub fn has_plan(&self) -> bool {
        self.subscriptions.is_found()
    }

    /// First subscription is for `product_id`. Status is not checked.
    pub fn has_plan_with_product(&self, product_id: &str) -> bool {
        self.first_subscription()
            .is_some_and(|sub| sub.is_for_product(product_id))
    }

    /// First subscription bills `price_id`. Status is not checked.
    pub fn has_plan_with_price(&self, price_id: &str) -> bool {
        self.first_subscription()
            .is_some_and(|sub| sub.bills_price(price_id))
    }

    /// Tiered decision: the first subscription must be active or trialing.
    ///
    /// A first subscription without a product grants nothing.
    pub fn decision(&self) -> EntitlementDecision {
        match &self.subscriptions {
            Lookup::Found(_) => {
                let result = self
                    .first_subscription()
                    .filter(|sub| sub.status.grants_entitlement())
                    .and_then(|sub| sub.product_id.clone())
                    .map(EntitlementResult::granted)
                    .unwrap_or_else(EntitlementResult::none);
                EntitlementDecision::Verified(result)
            }
            Lookup::NotFound => EntitlementDecision::Verified(EntitlementResult::none()),
            Lookup::ProviderError(error) => EntitlementDecision::Unverified {
                error: error.clone(),
            },
        }
    }
}

/// Evaluator for subscription entitlements.
///
/// Holds only the transport. The credential is passed on every call, so one
/// evaluator can serve concurrent checks for different customers.
pub struct EntitlementEvaluator {
    customers: CustomerResolver,
    subscriptions: SubscriptionResolver,
}

impl EntitlementEvaluator {
    pub fn new(api: Arc<dyn BillingApi>) -> Self {
        Self {
            customers: CustomerResolver::new(Arc::clone(&api)),
            subscriptions: SubscriptionResolver::new(api),
        }
    }

    /// Resolve the customer, then their subscriptions, once.
    ///
    /// The subscription listing is skipped when no customer matches.
    pub async fn snapshot(&self, email: &str, credential: &Credential) -> EntitlementSnapshot {
        let subscriptions = match self.customers.lookup_customer(email, credential).await {
            Lookup::Found(customer) => {
                self.subscriptions
                    .lookup_subscriptions(&customer.id, credential)
                    .await
            }
            Lookup::NotFound => Lookup::NotFound,
            Lookup::ProviderError(error) => Lookup::ProviderError(error),
        };
        EntitlementSnapshot { subscriptions }
    }

    /// True if the customer has any subscription record, whatever its status.
    pub async fn has_plan(&self, email: &str, credential: &Credential) -> bool {
        self.snapshot(email, credential).await.has_plan()
    }

    /// True if the customer's first subscription is for `product_id`.
    ///
    /// Status is not checked.
    pub async fn has_plan_with_product(
        &self,
        email: &str,
        credential: &Credential,
        product_id: &str,
    ) -> bool {
        self.snapshot(email, credential)
            .await
            .has_plan_with_product(product_id)
    }

    /// True if the customer's first subscription bills `price_id`.
    ///
    /// Status is not checked.
    pub async fn has_plan_with_price(
        &self,
        email: &str,
        credential: &Credential,
        price_id: &str,
    ) -> bool {
        self.snapshot(email, credential)
            .await
            .has_plan_with_price(price_id)
    }

    /// Tiered entitlement from the first subscription, if active or trialing.
    pub async fn resolve_entitlement(
        &self,
        email: &str,
        credential: &Credential,
    ) -> EntitlementResult {
        self.evaluate(email, credential).await.into_result()
    }

    /// Tiered entitlement, keeping provider failures distinct from absence.
    pub async fn evaluate(&self, email: &str, credential: &Credential) -> EntitlementDecision {
        let decision = self.snapshot(email, credential).await.decision();

        tracing::debug!(
            verified = decision.is_verified(),
            has_plan = decision.allows(FailurePolicy::FailClosed),
            "Entitlement evaluated"
        );
        decision
    }
}
