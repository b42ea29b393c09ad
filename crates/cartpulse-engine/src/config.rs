use crate::rounding::{MAX_DECIMALS, RoundingRule};
use crate::{Error, Result};
use cartpulse_types::metrics;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Names of the input columns the engine reads.
///
/// Output column names are fixed and not part of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub user_id: String,
    pub session_id: String,
    pub timestamp_local: String,
    pub partnumber: String,
    pub add_to_cart: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            user_id: metrics::USER_ID.to_string(),
            session_id: metrics::SESSION_ID.to_string(),
            timestamp_local: "timestamp_local".to_string(),
            partnumber: "partnumber".to_string(),
            add_to_cart: "add_to_cart".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub rounding: RoundingRule,
    pub decimals: u32,
    pub columns: ColumnNames,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            rounding: RoundingRule::HalfEven,
            decimals: 2,
            columns: ColumnNames::default(),
        }
    }
}

impl MetricsConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MetricsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.decimals > MAX_DECIMALS {
            return Err(Error::Config(format!(
                "decimals must be at most {}, got {}",
                MAX_DECIMALS, self.decimals
            )));
        }
        Ok(())
    }

    /// Read a config file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Round a derived metric with the configured rule and precision
    pub fn round(&self, value: f64) -> f64 {
        self.rounding.round(value, self.decimals)
    }
}
