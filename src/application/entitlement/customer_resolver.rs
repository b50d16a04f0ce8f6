//! CustomerResolver - maps an email to the provider's customer of record.

use std::sync::Arc;

use crate::domain::billing::{Credential, CustomerRecord, StripeCustomer};
use crate::ports::{list, BillingApi, BillingResource};

use super::Lookup;

/// Resolver for billing customers by email.
///
/// When several customers share an email, the first one the provider lists
/// wins. The provider's ordering is not guaranteed to be "most recent" and no
/// re-sorting is applied.
pub struct CustomerResolver {
    api: Arc<dyn BillingApi>,
}

impl CustomerResolver {
    pub fn new(api: Arc<dyn BillingApi>) -> Self {
        Self { api }
    }

    /// Look up the customer of record, keeping absence and failure apart.
    pub async fn lookup_customer(
        &self,
        email: &str,
        credential: &Credential,
    ) -> Lookup<CustomerRecord> {
        let result = list::<StripeCustomer>(
            self.api.as_ref(),
            BillingResource::Customers,
            &[("email", email)],
            credential,
        )
        .await;

        match result {
            Ok(customers) => match customers.into_iter().next() {
                Some(customer) => {
                    tracing::debug!(customer_id = %customer.id, "Customer resolved");
                    Lookup::Found(customer.into_record(email))
                }
                None => Lookup::NotFound,
            },
            Err(error) => {
                tracing::warn!(error = %error, "Customer lookup failed");
                Lookup::ProviderError(error)
            }
        }
    }

    /// Resolve the customer of record; `None` if absent or the lookup failed.
    pub async fn resolve_customer(
        &self,
        email: &str,
        credential: &Credential,
    ) -> Option<CustomerRecord> {
        self.lookup_customer(email, credential).await.found()
    }
}
