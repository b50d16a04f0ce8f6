//! Billing domain - provider records and entitlement values.
//!
//! Plain data describing what the billing provider knows about a customer.
//! Nothing here performs I/O; the resolvers in `application::entitlement`
//! populate these types through the `BillingApi` port.

mod credential;
mod customer;
mod entitlement;
mod plan;
mod stripe_objects;
mod subscription;

pub use credential::Credential;
pub use customer::CustomerRecord;
pub use entitlement::EntitlementResult;
pub use plan::{BillingInterval, PlanRecord, PlanRow};
pub use stripe_objects::{
    StripeCustomer, StripeErrorBody, StripeErrorDetail, StripeExpandable, StripePlan, StripePrice,
    StripeSubscription, StripeSubscriptionItem, StripeSubscriptionItems,
};
pub use subscription::{SubscriptionRecord, SubscriptionStatus};
