use serde::{Deserialize, Serialize};
use std::env;

use crate::error::AppError;

/// Environment prefix for nested overrides, e.g. `CREDIT_RISK_RISK__ALERT_THRESHOLD=80`.
pub const ENV_PREFIX: &str = "CREDIT_RISK";

pub const LOG_FORMATS: [&str; 3] = ["compact", "pretty", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub risk: RiskSettings,
    pub data: DataSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskSettings {
    /// Minimum score at which an approval raises an alert request.
    pub alert_threshold: u8,
    /// Persist alerts immediately instead of waiting for an operator to POST them.
    pub auto_create_alerts: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    pub seed_file: Option<String>,
    pub load_sample_roster: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api: ApiSettings::default(),
            risk: RiskSettings::default(),
            data: DataSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

impl Default for RiskSettings {
    fn default() -> Self {
        RiskSettings {
            alert_threshold: 70,
            auto_create_alerts: false,
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        DataSettings {
            seed_file: None,
            load_sample_roster: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl Settings {
    /// Defaults, then `config/default.*`, then `CREDIT_RISK_*` variables, then the
    /// short `API_HOST` / `API_PORT` / `LOG_LEVEL` / `SEED_FILE` variables.
    pub fn new() -> Result<Self, AppError> {
        let defaults = Settings::default();

        let settings: Settings = config::Config::builder()
            .set_default("api.host", defaults.api.host)?
            .set_default("api.port", defaults.api.port as i64)?
            .set_default("risk.alert_threshold", defaults.risk.alert_threshold as i64)?
            .set_default("risk.auto_create_alerts", defaults.risk.auto_create_alerts)?
            .set_default("data.load_sample_roster", defaults.data.load_sample_roster)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("api.host", env::var("API_HOST").ok())?
            .set_override_option("api.port", env::var("API_PORT").ok())?
            .set_override_option("logging.level", env::var("LOG_LEVEL").ok())?
            .set_override_option("data.seed_file", env::var("SEED_FILE").ok())?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.api.port == 0 {
            return Err(AppError::ConfigError("api.port must be non-zero".to_string()));
        }
        if self.risk.alert_threshold > 100 {
            return Err(AppError::ConfigError(format!(
                "risk.alert_threshold must be between 0 and 100, got {}",
                self.risk.alert_threshold
            )));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(AppError::ConfigError(format!(
                "logging.format must be one of {:?}, got {}",
                LOG_FORMATS, self.logging.format
            )));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
