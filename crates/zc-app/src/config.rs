//! Editor configuration.
//!
//! Every field has a default, so a config file only needs to name what it
//! overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use zc_form::{ExtraCharge, ValidateOn};

use crate::error::{AppError, AppResult};

pub const DEFAULT_ZONE_LIST_URL: &str = "https://raw.githubusercontent.com/cscart/apply-for-job/master/frontend/developer/files/rate-areas.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebounceConfig {
    pub search_keyup_ms: u64,
    pub search_focus_ms: u64,
    pub search_blur_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            search_keyup_ms: 0,
            search_focus_ms: 0,
            search_blur_ms: 90,
        }
    }
}

impl DebounceConfig {
    pub fn search_keyup(&self) -> Duration {
        Duration::from_millis(self.search_keyup_ms)
    }

    pub fn search_focus(&self) -> Duration {
        Duration::from_millis(self.search_focus_ms)
    }

    pub fn search_blur(&self) -> Duration {
        Duration::from_millis(self.search_blur_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    pub zone_list_url: String,
    pub locale: String,
    /// Base charge given to a zone whose catalog entry has none.
    pub base_charge_value: String,
    /// Bracket appended by the "add extra charge" button.
    pub extra_charge: ExtraCharge,
    pub validate_on: ValidateOn,
    pub debounce: DebounceConfig,
    pub total_cost_prefix: String,
    pub currency_suffix: String,
    /// Layouts at most this wide drop the total-cost prefix.
    pub min_wide_width: u32,
    pub layout_width: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            zone_list_url: DEFAULT_ZONE_LIST_URL.to_string(),
            locale: "ru-RU".to_string(),
            base_charge_value: "320.00".to_string(),
            extra_charge: ExtraCharge::new("1.000", "3.000", "+50.00"),
            validate_on: ValidateOn::Blur,
            debounce: DebounceConfig::default(),
            total_cost_prefix: "Total cost: ".to_string(),
            currency_suffix: " ₽".to_string(),
            min_wide_width: 491,
            layout_width: 1280,
        }
    }
}

impl EditorConfig {
    /// Load a YAML config file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let config: EditorConfig = serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.zone_list_url.trim().is_empty() {
            return Err(AppError::Config("zone_list_url must not be empty".to_string()));
        }
        if zc_core::parse_decimal(&self.base_charge_value).is_none() {
            return Err(AppError::Config(format!(
                "base_charge_value '{}' is not a decimal number",
                self.base_charge_value
            )));
        }
        Ok(())
    }

    pub fn wide_layout(&self) -> bool {
        self.layout_width > self.min_wide_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = EditorConfig::from_yaml(
            "validate_on: entry\ndebounce:\n  search_blur_ms: 10\nlayout_width: 400\n",
        )
        .unwrap();

        assert_eq!(config.validate_on, ValidateOn::Entry);
        assert_eq!(config.debounce.search_blur(), Duration::from_millis(10));
        assert_eq!(config.debounce.search_keyup_ms, 0);
        assert_eq!(config.base_charge_value, "320.00");
        assert!(!config.wide_layout());
    }

    #[test]
    fn rejects_non_numeric_default_charge() {
        let err = EditorConfig::from_yaml("base_charge_value: lots\n").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn default_extra_charge_matches_add_button() {
        let config = EditorConfig::default();
        assert_eq!(config.extra_charge.charge_value, "+50.00");
        assert!(config.wide_layout());
    }
}
