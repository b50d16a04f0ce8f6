//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ENTITLEMENT_GATE` prefix and nested values use double underscores as separators.
//!
//! Only the binary reads configuration. The entitlement logic itself takes its
//! transport and credential as arguments.
//!
//! There are two sections. `billing` holds the provider key and API base URL
//! the binary turns into a credential and client. `telemetry` sets up logging.
//! The crate serves no HTTP, stores nothing and sends no mail, so it has no
//! server, database, cache or email sections. Unrelated variables under the
//! prefix are ignored.
//!
//! # Example
//!
//! ```no_run
//! use entitlement_gate::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Billing API at {}", config.billing.api_base_url);
//! ```

mod billing;
mod error;
mod telemetry;

pub use billing::BillingConfig;
pub use error::{ConfigError, ValidationError};
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Billing provider configuration (Stripe)
    #[serde(default)]
    pub billing: BillingConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ENTITLEMENT_GATE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ENTITLEMENT_GATE__BILLING__API_KEY=sk_test_...` -> `billing.api_key`
    /// - `ENTITLEMENT_GATE__TELEMETRY__JSON=true` -> `telemetry.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ENTITLEMENT_GATE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.billing.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}
