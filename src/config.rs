use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{CurrentStockSnapshot, OrderRequest};
use crate::planner::constants::*;

/// Runtime configuration, read from an optional TOML file.
///
/// Every section and field is optional; anything missing keeps its built-in
/// default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorderConfig {
    pub defaults: CalculatorDefaults,
    pub presets: Presets,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// Values the calculator starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorDefaults {
    pub daily_usage: f64,
    pub days_until_next_delivery: f64,
    pub backup_multiplier: f64,
    pub weight_in_pounds: f64,
    pub trays: f64,
    pub tray_weight: f64,
}

impl Default for CalculatorDefaults {
    fn default() -> Self {
        Self {
            daily_usage: DEFAULT_DAILY_USAGE,
            days_until_next_delivery: DEFAULT_DAYS_UNTIL_DELIVERY,
            backup_multiplier: DEFAULT_BACKUP_MULTIPLIER,
            weight_in_pounds: DEFAULT_STOCK_POUNDS,
            trays: DEFAULT_TRAYS,
            tray_weight: DEFAULT_TRAY_WEIGHT,
        }
    }
}

impl CalculatorDefaults {
    /// The request the calculator would submit without any edits.
    pub fn to_request(&self) -> OrderRequest {
        OrderRequest::new(
            self.daily_usage,
            self.days_until_next_delivery,
            self.backup_multiplier,
            CurrentStockSnapshot {
                weight_in_pounds: Some(self.weight_in_pounds),
                trays: Some(self.trays),
                tray_weight: Some(self.tray_weight),
                ..Default::default()
            },
        )
    }
}

/// Pick lists offered by the interactive calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Presets {
    pub daily_usage: Vec<f64>,
    pub days_until_next_delivery: Vec<f64>,
    pub backup_multiplier: Vec<f64>,
    pub weight_in_pounds: Vec<f64>,
    pub trays: Vec<f64>,
    pub tray_weight: Vec<f64>,
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            daily_usage: PRESET_DAILY_USAGE.to_vec(),
            days_until_next_delivery: PRESET_DAYS_UNTIL_DELIVERY.to_vec(),
            backup_multiplier: PRESET_BACKUP_MULTIPLIER.to_vec(),
            weight_in_pounds: PRESET_STOCK_POUNDS.to_vec(),
            trays: PRESET_TRAYS.to_vec(),
            tray_weight: PRESET_TRAY_WEIGHT.to_vec(),
        }
    }
}

/// Cookie settings for the session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub max_age_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "__session".to_string(),
            max_age_secs: 60 * 60 * 24 * 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl ReorderConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load the configuration file if it exists, otherwise fall back to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
