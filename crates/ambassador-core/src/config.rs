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
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("AMBASSADOR_ENV", "development"))?;
    let log_level = or_default("AMBASSADOR_LOG_LEVEL", "info");
    let database_url = optional("DATABASE_URL");

    let db_max_connections = parse_u32("AMBASSADOR_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("AMBASSADOR_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("AMBASSADOR_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let search_base_url = or_default("AMBASSADOR_SEARCH_BASE_URL", "https://openapi.naver.com");
    let search_client_id = optional("AMBASSADOR_SEARCH_CLIENT_ID");
    let search_client_secret = optional("AMBASSADOR_SEARCH_CLIENT_SECRET");

    let scraper_request_timeout_secs =
        parse_u64("AMBASSADOR_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default(
        "AMBASSADOR_SCRAPER_USER_AGENT",
        "ambassador/0.1 (clinic-marketing)",
    );
    let scraper_max_retries = parse_u32("AMBASSADOR_SCRAPER_MAX_RETRIES", "2")?;
    let scraper_retry_backoff_base_secs =
        parse_u64("AMBASSADOR_SCRAPER_RETRY_BACKOFF_BASE_SECS", "1")?;
    let page_max_retries = parse_u32("AMBASSADOR_PAGE_MAX_RETRIES", "0")?;

    let politeness_min_ms = parse_u64("AMBASSADOR_POLITENESS_MIN_MS", "1000")?;
    let politeness_max_ms = parse_u64("AMBASSADOR_POLITENESS_MAX_MS", "3000")?;
    if politeness_min_ms > politeness_max_ms {
        return Err(ConfigError::InvalidEnvVar {
            var: "AMBASSADOR_POLITENESS_MIN_MS".to_string(),
            reason: format!(
                "{politeness_min_ms} exceeds AMBASSADOR_POLITENESS_MAX_MS ({politeness_max_ms})"
            ),
        });
    }

    let competitor_top_n = parse_positive_usize("AMBASSADOR_COMPETITOR_TOP_N", "3")?;
    let analysis_cache_ttl_secs = parse_u64("AMBASSADOR_ANALYSIS_CACHE_TTL_SECS", "3600")?;
    let history_retention = parse_positive_usize("AMBASSADOR_HISTORY_RETENTION", "30")?;

    Ok(AppConfig {
        env,
        log_level,
        database_url,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        search_base_url,
        search_client_id,
        search_client_secret,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_max_retries,
        scraper_retry_backoff_base_secs,
        page_max_retries,
        politeness_min_ms,
        politeness_max_ms,
        competitor_top_n,
        analysis_cache_ttl_secs,
        history_retention,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "AMBASSADOR_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
