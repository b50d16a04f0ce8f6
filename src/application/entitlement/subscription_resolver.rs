//! SubscriptionResolver - lists a customer's subscriptions.

use std::sync::Arc;

use crate::domain::billing::{Credential, StripeSubscription, SubscriptionRecord};
use crate::ports::{list, BillingApi, BillingResource};

use super::Lookup;

/// Resolver for a customer's subscription records.
///
/// Returns the provider's list as-is: no status filtering and no re-ordering.
/// Stripe omits canceled subscriptions unless `status=all` is sent, so it is.
pub struct SubscriptionResolver {
    api: Arc<dyn BillingApi>,
}

impl SubscriptionResolver {
    pub fn new(api: Arc<dyn BillingApi>) -> Self {
        Self { api }
    }

    /// Look up subscriptions; `NotFound` when the customer has none.
    pub async fn lookup_subscriptions(
        &self,
        customer_id: &str,
        credential: &Credential,
    ) -> Lookup<Vec<SubscriptionRecord>> {
        let result = list::<StripeSubscription>(
            self.api.as_ref(),
            BillingResource::Subscriptions,
            &[("customer", customer_id), ("status", "all")],
            credential,
        )
        .await
        .map(|subscriptions| {
            subscriptions
                .into_iter()
                .map(StripeSubscription::into_record)
                .collect::<Vec<_>>()
        });

        match result {
            Ok(records) if records.is_empty() => Lookup::NotFound,
            Ok(records) => {
                tracing::debug!(
                    customer_id,
                    count = records.len(),
                    "Subscriptions resolved"
                );
                Lookup::Found(records)
            }
            Err(error) => {
                tracing::warn!(customer_id, error = %error, "Subscription lookup failed");
                Lookup::ProviderError(error)
            }
        }
    }

    /// Resolve subscriptions in provider order.
    ///
    /// Never fails: a failed lookup yields an empty list.
    pub async fn resolve_subscriptions(
        &self,
        customer_id: &str,
        credential: &Credential,
    ) -> Vec<SubscriptionRecord> {
        self.lookup_subscriptions(customer_id, credential)
            .await
            .found()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::BillingError;
    use crate::adapters::stripe::MockBillingApi;
    use crate::domain::billing::SubscriptionStatus;
    use serde_json::json;

    fn credential() -> Credential {
        Credential::new("sk_test_123")
    }

    fn resolver(mock: &MockBillingApi) -> SubscriptionResolver {
        SubscriptionResolver::new(Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn preserves_provider_order_and_statuses() {
        let mock = MockBillingApi::new();
        mock.set_subscriptions(
            "cus_1",
            vec![
                SubscriptionRecord::new(SubscriptionStatus::Canceled, "price_old", "prod_old"),
                SubscriptionRecord::new(SubscriptionStatus::Active, "price_new", "prod_new"),
            ],
        );

        let subs = resolver(&mock)
            .resolve_subscriptions("cus_1", &credential())
            .await;

        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].status, SubscriptionStatus::Canceled);
        assert_eq!(subs[1].product_id.as_deref(), Some("prod_new"));
    }

    #[tokio::test]
    async fn requests_every_status() {
        let mock = MockBillingApi::new();

        resolver(&mock)
            .resolve_subscriptions("cus_1", &credential())
            .await;

        let call = &mock.calls()[0];
        assert_eq!(call.resource, BillingResource::Subscriptions);
        assert_eq!(call.param("customer"), Some("cus_1"));
        assert_eq!(call.param("status"), Some("all"));
    }

    #[tokio::test]
    async fn none_is_not_found() {
        let mock = MockBillingApi::new();

        let lookup = resolver(&mock)
            .lookup_subscriptions("cus_1", &credential())
            .await;

        assert_eq!(lookup, Lookup::NotFound);
    }

    #[tokio::test]
    async fn failure_collapses_to_empty() {
        let mock = MockBillingApi::new();
        mock.set_resource_error(
            BillingResource::Subscriptions,
            BillingError::from_status(500, "boom"),
        );
        let resolver = resolver(&mock);

        assert!(resolver
            .lookup_subscriptions("cus_1", &credential())
            .await
            .is_provider_error());
        assert!(resolver
            .resolve_subscriptions("cus_1", &credential())
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn subscription_without_price_is_still_listed() {
        let mock = MockBillingApi::new();
        mock.set_raw_response(
            BillingResource::Subscriptions,
            json!({"data": [{"id": "sub_1", "status": "active", "items": {"data": []}}]}),
        );

        let lookup = resolver(&mock)
            .lookup_subscriptions("cus_1", &credential())
            .await;

        let subs = lookup.found().unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].id.as_deref(), Some("sub_1"));
        assert_eq!(subs[0].price_id, None);
    }
}
