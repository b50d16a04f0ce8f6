//! Application layer - entitlement queries.
//!
//! This layer orchestrates lookups through the `BillingApi` port and applies
//! the entitlement rules. It reads no global configuration: the caller hands
//! in the transport once and the credential on every call.

pub mod entitlement;

pub use entitlement::{
    CustomerResolver, EntitlementDecision, EntitlementEvaluator, EntitlementSnapshot,
    FailurePolicy, Lookup, PlanCatalog, PlanCatalogFormatter, SubscriptionResolver,
};
