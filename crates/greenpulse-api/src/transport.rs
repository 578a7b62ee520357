// Shared transport configuration for building reqwest::Client instances.
//
// The Vision client and the image client share timeout and user-agent
// settings through this module.

use std::time::Duration;

use crate::error::Error;

/// Reference timeout for every outbound call (classification and image fetch).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

const USER_AGENT: &str = concat!("greenpulse/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Upper bound for a whole request, connect through body.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }

    /// Timeout in whole seconds, for error reporting.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout.as_secs()
    }
}
