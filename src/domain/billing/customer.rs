//! Billing provider customer.

use serde::{Deserialize, Serialize};

/// Customer record as known to the billing provider.
///
/// Keyed by email on the provider side. This is not the application's own
/// user identity; several provider customers may share one email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Provider's customer ID (cus_...).
    pub id: String,

    /// Email the customer was looked up by.
    pub email: String,
}

impl CustomerRecord {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}
