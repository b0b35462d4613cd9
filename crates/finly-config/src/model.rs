use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stores user-configurable preferences for the finance tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Period type applied to new budgets when the caller supplies none.
    /// Parsed case-insensitively by `finly-domain`.
    #[serde(default = "Config::default_period_type_value")]
    pub default_period_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for store data. Defaults to the
    /// platform data directory under `finly`.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            default_period_type: Self::default_period_type_value(),
            data_root: None,
        }
    }
}

impl Config {
    pub fn default_period_type_value() -> String {
        "monthly".into()
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("finly")
    }
}
