//! PlanCatalogFormatter - renders the provider's plan listing as a table.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::billing::{Credential, PlanRow, StripePlan};
use crate::ports::{list, BillingApi, BillingResource};

/// Diagnostic used when the provider lists no plans and reports no error.
const NO_PLANS_MESSAGE: &str = "No plans returned by billing provider";

/// Plan rows in provider order.
///
/// An empty catalog carries a diagnostic explaining why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlanCatalog {
    rows: Vec<PlanRow>,
    #[serde(skip)]
    diagnostic: Option<String>,
}

impl PlanCatalog {
    pub fn new(rows: Vec<PlanRow>) -> Self {
        Self {
            rows,
            diagnostic: None,
        }
    }

    /// An empty catalog with the reason it is empty.
    pub fn empty(diagnostic: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            diagnostic: Some(diagnostic.into()),
        }
    }

    pub fn rows(&self) -> &[PlanRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Why the catalog is empty, when it is.
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }
}

impl fmt::Display for PlanCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return write!(f, "{}", self.diagnostic().unwrap_or(NO_PLANS_MESSAGE));
        }

        let header = ["amount", "currency", "priceId", "productId", "period"].map(String::from);
        let cells: Vec<[String; 5]> = self
            .rows
            .iter()
            .map(|row| {
                [
                    row.amount.map(|a| a.to_string()).unwrap_or_default(),
                    row.currency.clone(),
                    row.price_id.clone(),
                    row.product_id.clone(),
                    row.period.clone(),
                ]
            })
            .collect();

        let mut widths = [0usize; 5];
        for row in std::iter::once(&header).chain(&cells) {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }
        let rule = widths.map(|w| "-".repeat(w));

        let lines: Vec<String> = [&header, &rule]
            .into_iter()
            .chain(&cells)
            .map(|row| format_row(row, &widths))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

fn format_row(cells: &[String; 5], widths: &[usize; 5]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    padded.join(" | ").trim_end().to_string()
}

/// Formatter for the provider's plan listing.
pub struct PlanCatalogFormatter {
    api: Arc<dyn BillingApi>,
}

impl PlanCatalogFormatter {
    pub fn new(api: Arc<dyn BillingApi>) -> Self {
        Self { api }
    }

    /// List every plan as a catalog row, in provider order.
    ///
    /// Never fails: an empty listing or a failed request yields an empty
    /// catalog and a logged diagnostic (the provider's error message when
    /// there is one). Tiered plans are listed with an empty amount.
    pub async fn list_plans(&self, credential: &Credential) -> PlanCatalog {
        let plans =
            match list::<StripePlan>(self.api.as_ref(), BillingResource::Plans, &[], credential)
                .await
            {
                Ok(plans) => plans,
                Err(error) => {
                    tracing::warn!(error = %error, "Plan listing failed");
                    return PlanCatalog::empty(error.message);
                }
            };

        if plans.is_empty() {
            tracing::warn!("{}", NO_PLANS_MESSAGE);
            return PlanCatalog::empty(NO_PLANS_MESSAGE);
        }

        let rows: Vec<PlanRow> = plans
            .into_iter()
            .map(|plan| plan.into_record().to_row())
            .collect();
        tracing::debug!(plans = rows.len(), "Plans listed");

        PlanCatalog::new(rows)
    }
}
