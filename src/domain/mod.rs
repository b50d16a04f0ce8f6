//! Domain layer containing business types.
//!
//! # Module Organization
//!
//! - `billing` - Billing provider records, credentials and entitlement values

pub mod billing;
