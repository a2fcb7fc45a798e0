//! Configuration for the Obelisk client
//!
//! Holds the parameters the proxy forwards to its dispatcher.

use std::time::Duration;

use crate::error::{ObeliskError, Result};

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Dealer Configuration
    // -------------------------------------------------------------------------
    /// Time to wait for a reply before the dealer resends or fails (milliseconds)
    pub timeout_ms: u64,

    /// Number of times the dealer may resend an unanswered request
    pub resends: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            resends: 0,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reply timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Total number of delivery attempts (first send plus resends)
    pub fn attempts(&self) -> u32 {
        u32::from(self.resends) + 1
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the reply timeout (in milliseconds)
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    /// Set the number of resends after a timeout
    pub fn resends(mut self, resends: u8) -> Self {
        self.config.resends = resends;
        self
    }

    pub fn build(self) -> Result<Config> {
        if self.config.timeout_ms == 0 {
            return Err(ObeliskError::Config(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(self.config)
    }
}
