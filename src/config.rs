use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::clock::ClockMode;
use crate::concept::GeminiConfig;
use crate::session::{Latency, SessionSettings};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String
    }
}

/// Runtime settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub session: SessionSettings,
    pub clock_mode: ClockMode,
    pub gemini: GeminiConfig
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>
    {
        let get = |key: &str| lookup(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());
        let defaults = SessionSettings::default();
        let default_latency = Latency::default();
        let default_gemini = GeminiConfig::default();

        let latency = Latency {
            authentication: millis(get("DIRECT_PAY_AUTH_LATENCY_MS"), "DIRECT_PAY_AUTH_LATENCY_MS", default_latency.authentication)?,
            submission: millis(get("DIRECT_PAY_SUBMIT_LATENCY_MS"), "DIRECT_PAY_SUBMIT_LATENCY_MS", default_latency.submission)?,
            success_display: millis(get("DIRECT_PAY_SUCCESS_DISPLAY_MS"), "DIRECT_PAY_SUCCESS_DISPLAY_MS", default_latency.success_display)?
        };

        let opening_balance = decimal(get("DIRECT_PAY_DEMO_BALANCE"), "DIRECT_PAY_DEMO_BALANCE", defaults.opening_balance)?;
        let minimum_withdrawal = decimal(get("DIRECT_PAY_MIN_WITHDRAWAL"), "DIRECT_PAY_MIN_WITHDRAWAL", defaults.minimum_withdrawal)?;

        let clock_mode = match get("DIRECT_PAY_CLOCK") {
            Some(value) => ClockMode::from_str(&value)
                .map_err(|error| ConfigError::InvalidValue { key: "DIRECT_PAY_CLOCK", value, reason: error.to_string() })?,
            None => ClockMode::default()
        };

        let timeout_secs = match get("GEMINI_TIMEOUT_SECS") {
            Some(value) => value.parse::<u64>()
                .map_err(|error| ConfigError::InvalidValue { key: "GEMINI_TIMEOUT_SECS", value, reason: error.to_string() })?,
            None => default_gemini.timeout.as_secs()
        };

        Ok(Self {
            session: SessionSettings {
                latency,
                profile_name: get("DIRECT_PAY_DEMO_NAME").unwrap_or(defaults.profile_name),
                opening_balance,
                minimum_withdrawal,
                seed: None
            },
            clock_mode,
            gemini: GeminiConfig {
                api_key: get("GEMINI_API_KEY"),
                base_url: get("GEMINI_BASE_URL").unwrap_or(default_gemini.base_url),
                timeout: Duration::from_secs(timeout_secs)
            }
        })
    }
}

fn millis(value: Option<String>, key: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    let Some(value) = value else {
        return Ok(default)
    };

    value.parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|error| ConfigError::InvalidValue { key, value, reason: error.to_string() })
}

fn decimal(value: Option<String>, key: &'static str, default: Decimal) -> Result<Decimal, ConfigError> {
    let Some(value) = value else {
        return Ok(default)
    };

    let parsed = Decimal::from_str(&value)
        .map_err(|error| ConfigError::InvalidValue { key, value: value.clone(), reason: error.to_string() })?;

    if parsed.is_sign_negative() {
        return Err(ConfigError::InvalidValue { key, value, reason: "must not be negative".to_string() })
    }

    Ok(parsed)
}
