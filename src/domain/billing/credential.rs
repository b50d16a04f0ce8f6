//! Billing provider credential.

use secrecy::{ExposeSecret, SecretString};

/// Secret key authenticating every call to the billing provider.
///
/// Supplied by the caller on each operation and never stored by the
/// entitlement logic. `Debug` output is redacted.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    /// Wrap a raw secret key.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(SecretString::new(secret.into()))
    }

    /// Raw key, for building the Authorization header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Returns true if the key is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.expose().trim().is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let credential = Credential::new("sk_test_very_secret");
        let rendered = format!("{:?}", credential);
        assert!(!rendered.contains("very_secret"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn expose_returns_raw_key() {
        let credential = Credential::new("sk_test_123");
        assert_eq!(credential.expose(), "sk_test_123");
    }

    #[test]
    fn blank_detection() {
        assert!(Credential::new("").is_blank());
        assert!(Credential::new("   ").is_blank());
        assert!(!Credential::new("sk_test_123").is_blank());
    }
}
