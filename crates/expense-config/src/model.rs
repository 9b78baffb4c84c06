use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use expense_domain::{BASE_CURRENCY, DEFAULT_BUDGET_LIMIT, DEFAULT_CATEGORY_SUGGESTIONS};

use crate::ConfigError;

/// Stores user-configurable preferences for the tracker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_display_currency")]
    pub display_currency: String,
    #[serde(default = "Config::default_budget_limit")]
    pub budget_limit: f64,
    #[serde(default = "Config::default_storage_key")]
    pub storage_key: String,
    #[serde(default = "Config::default_category_suggestions")]
    pub category_suggestions: Vec<String>,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the ledger file. Defaults to `<app home>/data`.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_currency: Self::default_display_currency(),
            budget_limit: Self::default_budget_limit(),
            storage_key: Self::default_storage_key(),
            category_suggestions: Self::default_category_suggestions(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_display_currency() -> String {
        BASE_CURRENCY.into()
    }

    pub fn default_budget_limit() -> f64 {
        DEFAULT_BUDGET_LIMIT
    }

    pub fn default_storage_key() -> String {
        "expenses".into()
    }

    pub fn default_category_suggestions() -> Vec<String> {
        DEFAULT_CATEGORY_SUGGESTIONS
            .into_iter()
            .map(String::from)
            .collect()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Updates the budget limit, rejecting non-positive or non-finite values.
    pub fn set_budget_limit(&mut self, limit: f64) -> Result<(), ConfigError> {
        if !limit.is_finite() || limit <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "budget limit must be a positive number (got {limit})"
            )));
        }
        self.budget_limit = limit;
        Ok(())
    }

    pub fn resolve_data_dir(&self, app_home: &std::path::Path) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        app_home.join("data")
    }

    /// Default application home, `~/.expense_tracker`.
    pub fn default_app_home() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".expense_tracker")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_files_fill_in_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"budget_limit": 5000}"#).unwrap();
        assert_eq!(cfg.budget_limit, 5000.0);
        assert_eq!(cfg.display_currency, "INR");
        assert_eq!(cfg.storage_key, "expenses");
        assert!(cfg.ui_color_enabled);
        assert_eq!(cfg.category_suggestions.len(), 7);
    }

    #[test]
    fn budget_limit_must_be_positive() {
        let mut cfg = Config::default();
        assert!(cfg.set_budget_limit(0.0).is_err());
        assert!(cfg.set_budget_limit(f64::INFINITY).is_err());
        cfg.set_budget_limit(1500.0).unwrap();
        assert_eq!(cfg.budget_limit, 1500.0);
    }

    #[test]
    fn defaults_follow_domain_constants() {
        let cfg = Config::default();
        assert_eq!(cfg.display_currency, BASE_CURRENCY);
        assert_eq!(cfg.budget_limit, DEFAULT_BUDGET_LIMIT);
        assert_eq!(cfg.category_suggestions, DEFAULT_CATEGORY_SUGGESTIONS.to_vec());
    }

    #[test]
    fn data_dir_defaults_under_app_home() {
        let cfg = Config::default();
        let home = PathBuf::from("/tmp/tracker");
        assert_eq!(cfg.resolve_data_dir(&home), home.join("data"));
    }
}
