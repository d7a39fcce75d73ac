//! # Application Configuration
//!
//! Defaults suitable for a desktop session, overridable from the
//! environment:
//!
//! | Variable                 | Field                          |
//! |--------------------------|--------------------------------|
//! | `CALCULA_LANG`           | `language`                     |
//! | `CALCULA_DPR`            | `device_pixel_ratio`           |
//! | `CALCULA_CANVAS_HEIGHT`  | `canvas_height`                |
//! | `GEMINI_API_KEY`         | `assistant.api_key`            |
//! | `API_KEY`                | `assistant.api_key` (fallback) |
//! | `CALCULA_MODEL`          | `assistant.model`              |
//! | `CALCULA_ENDPOINT`       | `assistant.endpoint`           |
//! | `CALCULA_TIMEOUT_SECS`   | `assistant.timeout_secs`       |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::drawing::{DEFAULT_HEIGHT, MAX_HEIGHT, MIN_HEIGHT};
use crate::errors::{CalcError, CalcResult};
use crate::i18n::Language;
use crate::units::{CssPx, DevicePixelRatio};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub language: Language,
    pub device_pixel_ratio: DevicePixelRatio,
    /// Initial drawing surface height, within the resize handle's range
    pub canvas_height: CssPx,
    pub assistant: AssistantConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            language: Language::default(),
            device_pixel_ratio: DevicePixelRatio::ONE,
            canvas_height: DEFAULT_HEIGHT,
            assistant: AssistantConfig::default(),
        }
    }
}

/// Remote problem solver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Without a key every request fails with an interpretation error
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        AssistantConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with the process environment
    pub fn from_env() -> CalcResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`.
    ///
    /// Empty values are treated as unset.
    ///
    /// ```rust
    /// use calc_core::config::AppConfig;
    /// use calc_core::i18n::Language;
    ///
    /// let config = AppConfig::from_lookup(|key| match key {
    ///     "CALCULA_LANG" => Some("de".to_string()),
    ///     "API_KEY" => Some("secret".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.language, Language::De);
    /// assert_eq!(config.assistant.api_key.as_deref(), Some("secret"));
    /// ```
    pub fn from_lookup<F>(lookup: F) -> CalcResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = AppConfig::default();

        if let Some(value) = get("CALCULA_LANG") {
            config.language = value
                .parse()
                .map_err(|_| CalcError::configuration("CALCULA_LANG", format!("unknown language '{value}'")))?;
        }
        if let Some(value) = get("CALCULA_DPR") {
            let ratio: f32 = parse_number("CALCULA_DPR", &value)?;
            config.device_pixel_ratio = DevicePixelRatio::new(ratio)
                .map_err(|e| CalcError::configuration("CALCULA_DPR", e.to_string()))?;
        }
        if let Some(value) = get("CALCULA_CANVAS_HEIGHT") {
            let height: f32 = parse_number("CALCULA_CANVAS_HEIGHT", &value)?;
            if !height.is_finite() {
                return Err(CalcError::configuration("CALCULA_CANVAS_HEIGHT", "must be finite"));
            }
            config.canvas_height = CssPx(height).clamp(MIN_HEIGHT, MAX_HEIGHT);
        }
        if let Some(key) = get("GEMINI_API_KEY").or_else(|| get("API_KEY")) {
            config.assistant.api_key = Some(key.trim().to_string());
        }
        if let Some(model) = get("CALCULA_MODEL") {
            config.assistant.model = model.trim().to_string();
        }
        if let Some(endpoint) = get("CALCULA_ENDPOINT") {
            config.assistant.endpoint = endpoint.trim().to_string();
        }
        if let Some(value) = get("CALCULA_TIMEOUT_SECS") {
            config.assistant.timeout_secs = parse_number("CALCULA_TIMEOUT_SECS", &value)?;
        }

        tracing::debug!(
            language = %config.language,
            dpr = config.device_pixel_ratio.value(),
            model = %config.assistant.model,
            has_api_key = config.assistant.api_key.is_some(),
            "configuration loaded"
        );
        Ok(config)
    }
}

fn parse_number<T>(key: &str, value: &str) -> CalcResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| CalcError::configuration(key, format!("'{value}': {e}")))
}
