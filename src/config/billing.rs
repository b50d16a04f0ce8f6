//! Billing provider configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::stripe::{StripeConfig, DEFAULT_API_BASE_URL};
use crate::domain::billing::Credential;

/// Billing provider configuration (Stripe)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillingConfig {
    /// Stripe secret or restricted API key
    #[serde(default)]
    pub api_key: String,

    /// Stripe API base URL, including the version segment
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl BillingConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.api_key.starts_with("sk_test_") || self.api_key.starts_with("rk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.api_key.starts_with("sk_live_") || self.api_key.starts_with("rk_live_")
    }

    /// The configured key as a per-call credential
    pub fn credential(&self) -> Credential {
        Credential::new(self.api_key.clone())
    }

    /// Client configuration for the Stripe adapter
    pub fn stripe_config(&self) -> StripeConfig {
        StripeConfig::new(self.api_base_url.clone())
    }

    /// Validate billing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.credential().is_blank() {
            return Err(ValidationError::MissingRequired("BILLING__API_KEY"));
        }

        // Secret (sk_) or restricted (rk_) keys only; publishable keys cannot list customers
        if !self.api_key.starts_with("sk_") && !self.api_key.starts_with("rk_") {
            return Err(ValidationError::InvalidStripeKey);
        }

        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://")
        {
            return Err(ValidationError::InvalidApiBaseUrl);
        }

        Ok(())
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> BillingConfig {
        BillingConfig {
            api_key: "sk_test_abcd1234".to_string(),
            api_base_url: default_api_base_url(),
        }
    }

    #[test]
    fn test_is_test_mode() {
        let config = valid();
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());
    }

    #[test]
    fn test_is_live_mode() {
        let config = BillingConfig {
            api_key: "rk_live_xxx".to_string(),
            ..valid()
        };
        assert!(config.is_live_mode());
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = BillingConfig {
            api_key: String::new(),
            ..valid()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_validation_blank_api_key() {
        let config = BillingConfig {
            api_key: "   ".to_string(),
            ..valid()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("BILLING__API_KEY"))
        ));
    }

    #[test]
    fn test_validation_invalid_api_key_prefix() {
        let config = BillingConfig {
            api_key: "pk_test_xxx".to_string(), // Publishable key
            ..valid()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidStripeKey)
        ));
    }

    #[test]
    fn test_validation_invalid_base_url() {
        let config = BillingConfig {
            api_base_url: "api.stripe.com/v1".to_string(),
            ..valid()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidApiBaseUrl)
        ));
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_credential_and_client_config() {
        let config = BillingConfig {
            api_base_url: "http://localhost:12111/v1".to_string(),
            ..valid()
        };
        assert_eq!(config.credential().expose(), "sk_test_abcd1234");
        assert_eq!(config.stripe_config().api_base_url(), "http://localhost:12111/v1");
    }
}
