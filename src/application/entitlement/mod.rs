//! Entitlement queries against the billing provider.
//!
//! Data flow: `CustomerResolver` -> `SubscriptionResolver` ->
//! `EntitlementEvaluator`, all over the `BillingApi` port.
//! `PlanCatalogFormatter` reads the plan listing directly.

mod customer_resolver;
mod entitlement_evaluator;
mod lookup;
mod plan_catalog;
mod subscription_resolver;

pub use customer_resolver::CustomerResolver;
pub use entitlement_evaluator::{
    EntitlementDecision, EntitlementEvaluator, EntitlementSnapshot, FailurePolicy,
};
pub use lookup::Lookup;
pub use plan_catalog::{PlanCatalog, PlanCatalogFormatter};
pub use subscription_resolver::SubscriptionResolver;
