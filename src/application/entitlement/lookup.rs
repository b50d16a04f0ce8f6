//! Tagged lookup outcome.

use crate::ports::BillingError;

/// Outcome of a provider lookup.
///
/// Keeps "the provider has nothing" apart from "the provider could not be
/// asked". The boolean entitlement checks collapse both to a negative answer;
/// `EntitlementEvaluator::evaluate` keeps them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The provider returned a matching record.
    Found(T),

    /// The provider answered, with no match.
    NotFound,

    /// The provider could not be reached or returned an error.
    ProviderError(BillingError),
}

impl<T> Lookup<T> {
    /// The found value, discarding why it might be missing.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound | Lookup::ProviderError(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_provider_error(&self) -> bool {
        matches!(self, Lookup::ProviderError(_))
    }
}
