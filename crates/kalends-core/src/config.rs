use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{DEFAULT_HORIZON_DAYS, DEFAULT_PRODID};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub calendar: CalendarConfig,
    pub recurrence: RecurrenceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    pub product_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecurrenceConfig {
    pub default_horizon_days: i64,
}

impl RecurrenceConfig {
    /// ## Summary
    /// Returns the expansion horizon as a `chrono` delta.
    ///
    /// Non-positive or out-of-range values fall back to the built-in default.
    #[must_use]
    pub fn horizon(&self) -> chrono::TimeDelta {
        let fallback = chrono::TimeDelta::days(DEFAULT_HORIZON_DAYS);
        if self.default_horizon_days > 0 {
            chrono::TimeDelta::try_days(self.default_horizon_days).unwrap_or(fallback)
        } else {
            fallback
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional `kalends.toml`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("logging.level", "info")?
            .set_default("calendar.product_id", DEFAULT_PRODID)?
            .set_default("recurrence.default_horizon_days", DEFAULT_HORIZON_DAYS)?
            .add_source(
                config::Environment::with_prefix("KALENDS")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("kalends.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Checks values the engine cannot work with.
    ///
    /// ## Errors
    /// Returns `ConfigError` if the product identifier is blank.
    pub fn validate(&self) -> CoreResult<()> {
        if self.calendar.product_id.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "calendar.product_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            calendar: CalendarConfig {
                product_id: DEFAULT_PRODID.to_string(),
            },
            recurrence: RecurrenceConfig {
                default_horizon_days: DEFAULT_HORIZON_DAYS,
            },
        }
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    let settings = Settings::load()?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn load_uses_defaults() {
        tracing::debug!("Loading settings without overrides");

        let settings = Settings::load().unwrap();
        assert_eq!(settings.calendar.product_id, DEFAULT_PRODID);
        assert_eq!(
            settings.recurrence.default_horizon_days,
            DEFAULT_HORIZON_DAYS
        );
    }

    #[test]
    fn default_matches_constants() {
        let settings = Settings::default();
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.calendar.product_id, "-//kalends//Calendar Engine//EN");
    }

    #[test]
    fn validate_rejects_blank_product_id() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());

        settings.calendar.product_id = "  ".to_string();
        assert!(matches!(
            settings.validate(),
            Err(CoreError::ConfigError(_))
        ));
    }

    #[test]
    fn horizon_falls_back_on_non_positive() {
        let config = RecurrenceConfig {
            default_horizon_days: 0,
        };
        assert_eq!(config.horizon(), chrono::TimeDelta::days(14));

        let config = RecurrenceConfig {
            default_horizon_days: 30,
        };
        assert_eq!(config.horizon(), chrono::TimeDelta::days(30));
    }

    #[test]
    fn horizon_falls_back_on_overflow() {
        let config = RecurrenceConfig {
            default_horizon_days: i64::MAX,
        };
        assert_eq!(config.horizon(), chrono::TimeDelta::days(14));
    }
}
