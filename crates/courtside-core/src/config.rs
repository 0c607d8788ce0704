//! Configuration types for Courtside

use serde::{Deserialize, Serialize};

use crate::Error;

/// Payment economics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Dollars per token (e.g., 0.01 means 100 tokens = $1.00)
    #[serde(default = "default_token_rate")]
    pub token_rate: f64,

    /// Platform fee taken from session stakes, as a percentage
    #[serde(default = "default_platform_fee_pct")]
    pub platform_fee_pct: f64,
}

fn default_token_rate() -> f64 {
    0.01
}

fn default_platform_fee_pct() -> f64 {
    10.0
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            token_rate: default_token_rate(),
            platform_fee_pct: default_platform_fee_pct(),
        }
    }
}

impl PaymentConfig {
    /// Reject configurations that would make the split math meaningless.
    pub fn validate(&self) -> Result<(), Error> {
        if self.token_rate <= 0.0 || !self.token_rate.is_finite() {
            return Err(Error::Config(format!(
                "token_rate must be positive, got {}",
                self.token_rate
            )));
        }
        if !(0.0..=100.0).contains(&self.platform_fee_pct) {
            return Err(Error::Config(format!(
                "platform_fee_pct must be within 0-100, got {}",
                self.platform_fee_pct
            )));
        }
        Ok(())
    }
}
