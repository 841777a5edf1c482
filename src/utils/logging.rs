use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingSettings;
use crate::error::AppError;

/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("credit_risk_workflow={},tower_http={}", settings.level, settings.level))
    });

    let registry = tracing_subscriber::registry().with(filter);
    let result = match settings.format.as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).try_init(),
        "pretty" => registry.with(tracing_subscriber::fmt::layer().pretty()).try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer().compact()).try_init(),
    };
    result.map_err(|e| AppError::ConfigError(format!("failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}, format: {}", settings.level, settings.format);
    Ok(())
}
