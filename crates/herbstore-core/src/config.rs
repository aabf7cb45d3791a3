use crate::app_config::AppConfig;
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
/// Every variable is optional; defaults come from [`AppConfig::default`].
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let defaults = AppConfig::default();

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let log_level = or_default("HERBSTORE_LOG_LEVEL", &defaults.log_level);
    let catalog_path = lookup("HERBSTORE_CATALOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let store_name = or_default("HERBSTORE_STORE_NAME", &defaults.store_name);
    let currency_symbol = or_default("HERBSTORE_CURRENCY_SYMBOL", &defaults.currency_symbol);

    let whatsapp_number = or_default("HERBSTORE_WHATSAPP_NUMBER", &defaults.whatsapp_number);
    if whatsapp_number.is_empty() || !whatsapp_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidEnvVar {
            var: "HERBSTORE_WHATSAPP_NUMBER".to_string(),
            reason: "must be digits only, including the country code".to_string(),
        });
    }

    let payment_processing_ms =
        parse_u64("HERBSTORE_PAYMENT_PROCESSING_MS", defaults.payment_processing_ms)?;
    let payment_success_ms =
        parse_u64("HERBSTORE_PAYMENT_SUCCESS_MS", defaults.payment_success_ms)?;

    Ok(AppConfig {
        log_level,
        catalog_path,
        store_name,
        currency_symbol,
        whatsapp_number,
        payment_processing_ms,
        payment_success_ms,
    })
}
