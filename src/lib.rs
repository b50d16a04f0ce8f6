//! Entitlement Gate - subscription checks against a billing provider
//!
//! Answers "does this customer hold a paid plan, and which one?" by looking
//! the customer up by email at a Stripe-compatible billing API and evaluating
//! their subscriptions.
//!
//! ```no_run
//! use std::sync::Arc;
//! use entitlement_gate::adapters::stripe::{StripeBillingClient, StripeConfig};
//! use entitlement_gate::application::EntitlementEvaluator;
//! use entitlement_gate::domain::billing::Credential;
//!
//! # async fn run() {
//! let api = Arc::new(StripeBillingClient::new(StripeConfig::default()));
//! let evaluator = EntitlementEvaluator::new(api);
//! let key = Credential::new("sk_test_...");
//!
//! if evaluator.has_plan_with_product("ada@example.com", &key, "prod_pro").await {
//!     // show gated content
//! }
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
