//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the entitlement logic to external systems:
//! - `stripe` - Stripe billing API client and an in-memory mock

pub mod stripe;
