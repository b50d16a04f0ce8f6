//! Plan (price) definitions offered by the billing provider.

use serde::{Deserialize, Serialize};

/// Billing period unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Day,
    Week,
    Month,
    Year,
}

impl BillingInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingInterval::Day => "day",
            BillingInterval::Week => "week",
            BillingInterval::Month => "month",
            BillingInterval::Year => "year",
        }
    }
}

impl std::fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recurring price as listed by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord {
    /// Amount in minor currency units (cents). `None` for tiered pricing.
    pub amount: Option<i64>,

    /// Lowercase ISO currency code.
    pub currency: String,

    /// Provider's price ID.
    pub price_id: String,

    /// Product the price belongs to.
    pub product_id: String,

    /// Number of `interval` units per billing cycle.
    pub interval_count: u32,

    pub interval: BillingInterval,
}

impl PlanRecord {
    /// Human-readable billing period, e.g. `"1 month"` or `"3 week"`.
    ///
    /// The unit is never pluralised.
    pub fn period(&self) -> String {
        format!("{} {}", self.interval_count, self.interval)
    }

    /// Project into a catalog row.
    pub fn to_row(&self) -> PlanRow {
        PlanRow {
            amount: self.amount,
            currency: self.currency.clone(),
            price_id: self.price_id.clone(),
            product_id: self.product_id.clone(),
            period: self.period(),
        }
    }
}

/// One row of the plan catalog table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRow {
    /// Serialized as `null` when the plan has no flat amount.
    pub amount: Option<i64>,
    pub currency: String,
    pub price_id: String,
    pub product_id: String,
    pub period: String,
}
