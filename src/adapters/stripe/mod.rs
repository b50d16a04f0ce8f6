//! Stripe billing API adapter.
//!
//! Implements the `BillingApi` port for Stripe, covering the three read-only
//! list endpoints entitlement checks need:
//! - `GET /plans`
//! - `GET /customers?email=...`
//! - `GET /subscriptions?customer=...`
//!
//! # Security
//!
//! - The secret key is passed per call and sent as the HTTP Basic username
//! - Keys are wrapped in `secrecy::SecretString` and never logged
//! - Request URLs are stripped from transport errors (they contain emails)

mod mock_billing_api;
mod stripe_billing_client;

pub use mock_billing_api::{MockBillingApi, RecordedRequest};
pub use stripe_billing_client::{StripeBillingClient, StripeConfig, DEFAULT_API_BASE_URL};
