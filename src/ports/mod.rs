//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the entitlement logic and the outside world. Adapters implement these ports.
//!
//! - `BillingApi` - read-only access to the subscription billing provider

mod billing_api;

pub use billing_api::{list, BillingApi, BillingError, BillingErrorCode, BillingResource};
