//! Entitlement decision value.

use serde::Serialize;

/// Outcome of a tiered entitlement check.
///
/// A point-in-time judgment. Callers must re-validate rather than cache it
/// across sessions.
///
/// Invariant: `has_plan` is true only together with a `product_id` taken from
/// a subscription whose status granted entitlement when it was evaluated.
/// Fields are private so the two constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementResult {
    has_plan: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_id: Option<String>,
}

impl EntitlementResult {
    /// No entitlement.
    pub fn none() -> Self {
        Self {
            has_plan: false,
            product_id: None,
        }
    }

    /// Entitled to `product_id`.
    pub fn granted(product_id: impl Into<String>) -> Self {
        Self {
            has_plan: true,
            product_id: Some(product_id.into()),
        }
    }

    pub fn has_plan(&self) -> bool {
        self.has_plan
    }

    /// Product the entitlement is for; `None` when `has_plan` is false.
    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }
}

impl Default for EntitlementResult {
    fn default() -> Self {
        Self::none()
    }
}
