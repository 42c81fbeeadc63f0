use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    use rust_decimal::Decimal;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_rate = |var: &str, default: &str| -> Result<Decimal, ConfigError> {
        let raw = or_default(var, default);
        let rate = raw
            .trim()
            .parse::<Decimal>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if rate <= Decimal::ZERO {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be greater than zero, got {rate}"),
            });
        }
        Ok(rate)
    };

    let env = parse_environment(&or_default("DEALSCAN_ENV", "development"));
    let log_level = or_default("DEALSCAN_LOG_LEVEL", "info");
    let gst_rate = parse_rate("DEALSCAN_GST_RATE", "1.15")?;
    let input_path = PathBuf::from(or_default("DEALSCAN_INPUT_PATH", "./listings.json"));
    let output_path = PathBuf::from(or_default("DEALSCAN_OUTPUT_PATH", "./deals.json"));

    Ok(AppConfig {
        env,
        log_level,
        gst_rate,
        input_path,
        output_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
