//! Tracing subscriber setup.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::TelemetryConfig;

/// Build the log filter: `RUST_LOG` when set, otherwise the configured level.
pub fn env_filter(config: &TelemetryConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(
    config: &TelemetryConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let builder = fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr);

    if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_fails() {
        let config = TelemetryConfig::default();
        // The first call may already have happened in another test.
        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err());
    }
}
