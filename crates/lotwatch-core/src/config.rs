use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_FEED_URL: &str =
    "https://datamall2.mytransport.sg/ltaodataservice/CarParkAvailabilityv2";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("LOTWATCH_ENV", "development"))?;

    let account_key = lookup("ACCOUNT_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    if account_key.is_none() && env != Environment::Development {
        return Err(ConfigError::MissingEnvVar("ACCOUNT_KEY".to_string()));
    }

    let bind_addr = parse_addr("LOTWATCH_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("LOTWATCH_LOG_LEVEL", "info");
    let static_dir = PathBuf::from(or_default("LOTWATCH_STATIC_DIR", "./public"));
    let feed_url = or_default("LOTWATCH_FEED_URL", DEFAULT_FEED_URL);
    let feed_timeout_secs = parse_u64("LOTWATCH_FEED_TIMEOUT_SECS", "30")?;
    if feed_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "LOTWATCH_FEED_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least one second".to_string(),
        });
    }
    let user_agent = or_default("LOTWATCH_USER_AGENT", "lotwatch/0.1 (carpark-availability)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        static_dir,
        account_key,
        feed_url,
        feed_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LOTWATCH_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
