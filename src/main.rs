//! `entitlement-gate` operator binary.
//!
//! Reads configuration from the environment, then either prints the plan
//! catalog or checks a single customer's entitlement.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use std::error::Error;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use entitlement_gate::adapters::stripe::StripeBillingClient;
use entitlement_gate::application::{
    EntitlementEvaluator, EntitlementSnapshot, PlanCatalogFormatter,
};
use entitlement_gate::config::AppConfig;
use entitlement_gate::ports::BillingApi;
use entitlement_gate::telemetry;

/// `entitlement-gate` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "entitlement-gate",
    about = "Check subscription entitlements against the billing provider",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every listed plan as a table.
    Plans,

    /// Print a customer's entitlement decision as JSON.
    Check {
        /// Customer email address.
        email: String,
        /// Also report whether the first subscription is for this product.
        #[arg(long = "product", value_name = "id")]
        product: Option<String>,
        /// Also report whether the first subscription bills this price.
        #[arg(long = "price", value_name = "id")]
        price: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();

    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init_tracing(&config.telemetry).map_err(|error| error.to_string())?;

    let mode = if config.billing.is_live_mode() {
        "live"
    } else if config.billing.is_test_mode() {
        "test"
    } else {
        "unknown"
    };
    tracing::info!(mode, api_base_url = %config.billing.api_base_url, "Billing provider configured");

    let api: Arc<dyn BillingApi> =
        Arc::new(StripeBillingClient::new(config.billing.stripe_config()));
    let credential = config.billing.credential();

    match args.command {
        Command::Plans => {
            let catalog = PlanCatalogFormatter::new(api).list_plans(&credential).await;
            println!("{catalog}");
        }
        Command::Check {
            email,
            product,
            price,
        } => {
            let snapshot = EntitlementEvaluator::new(api)
                .snapshot(&email, &credential)
                .await;

            let report = check_report(&email, &snapshot, product, price);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// JSON report for `check`, answered entirely from one snapshot.
fn check_report(
    email: &str,
    snapshot: &EntitlementSnapshot,
    product: Option<String>,
    price: Option<String>,
) -> Value {
    let mut report = json!({
        "email": email,
        "decision": snapshot.decision(),
    });
    if let Some(product_id) = product {
        let matches = snapshot.has_plan_with_product(&product_id);
        report["hasPlanWithProduct"] = json!({ "productId": product_id, "matches": matches });
    }
    if let Some(price_id) = price {
        let matches = snapshot.has_plan_with_price(&price_id);
        report["hasPlanWithPrice"] = json!({ "priceId": price_id, "matches": matches });
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use entitlement_gate::adapters::stripe::MockBillingApi;
    use entitlement_gate::domain::billing::{
        Credential, CustomerRecord, SubscriptionRecord, SubscriptionStatus,
    };
    use entitlement_gate::ports::BillingResource;

    #[test]
    fn cli_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn check_accepts_product_and_price() {
        let args = CliArgs::try_parse_from([
            "entitlement-gate",
            "check",
            "ada@example.com",
            "--product",
            "prod_A",
            "--price",
            "price_A",
        ])
        .unwrap();

        match args.command {
            Command::Check {
                email,
                product,
                price,
            } => {
                assert_eq!(email, "ada@example.com");
                assert_eq!(product.as_deref(), Some("prod_A"));
                assert_eq!(price.as_deref(), Some("price_A"));
            }
            Command::Plans => panic!("expected check"),
        }
    }

    #[test]
    fn check_requires_email() {
        assert!(CliArgs::try_parse_from(["entitlement-gate", "check"]).is_err());
    }

    #[tokio::test]
    async fn check_report_uses_a_single_lookup() {
        let mock = MockBillingApi::new();
        mock.add_customer(CustomerRecord::new("cus_1", "ada@example.com"));
        mock.add_subscription(
            "cus_1",
            SubscriptionRecord::new(SubscriptionStatus::Active, "price_A", "prod_A"),
        );
        let snapshot = EntitlementEvaluator::new(Arc::new(mock.clone()))
            .snapshot("ada@example.com", &Credential::new("sk_test_123"))
            .await;

        let report = check_report(
            "ada@example.com",
            &snapshot,
            Some("prod_A".to_string()),
            Some("price_B".to_string()),
        );

        assert_eq!(report["decision"]["outcome"], "verified");
        assert_eq!(report["decision"]["productId"], "prod_A");
        assert_eq!(report["hasPlanWithProduct"]["matches"], true);
        assert_eq!(report["hasPlanWithPrice"]["matches"], false);
        assert_eq!(mock.call_count(BillingResource::Customers), 1);
        assert_eq!(mock.call_count(BillingResource::Subscriptions), 1);
    }

    #[tokio::test]
    async fn check_report_omits_unrequested_matches() {
        let snapshot = EntitlementEvaluator::new(Arc::new(MockBillingApi::new()))
            .snapshot("nobody@example.com", &Credential::new("sk_test_123"))
            .await;

        let report = check_report("nobody@example.com", &snapshot, None, None);

        assert_eq!(report["decision"]["hasPlan"], false);
        assert!(report.get("hasPlanWithProduct").is_none());
        assert!(report.get("hasPlanWithPrice").is_none());
    }
}
