use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_LLM_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_LLM_MODEL: &str = "deepseek/deepseek-r1";

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
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset so `.env` templates with `KEY=` work.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("REPSCOPE_ENV", "development"))?;
    let bind_addr = parse_addr("REPSCOPE_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("REPSCOPE_LOG_LEVEL", "info");

    let llm_base_url = or_default("REPSCOPE_LLM_BASE_URL", DEFAULT_LLM_BASE_URL)
        .trim_end_matches('/')
        .to_string();
    let llm_api_key = optional("REPSCOPE_LLM_API_KEY");
    let llm_model = or_default("REPSCOPE_LLM_MODEL", DEFAULT_LLM_MODEL);
    let llm_timeout_secs = parse_u64("REPSCOPE_LLM_TIMEOUT_SECS", "30")?;
    if llm_timeout_secs == 0 {
        return Err(invalid(
            "REPSCOPE_LLM_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }

    let llm_temperature = or_default("REPSCOPE_LLM_TEMPERATURE", "0.3")
        .parse::<f32>()
        .map_err(|e| invalid("REPSCOPE_LLM_TEMPERATURE", e.to_string()))?;
    if !(0.0..=2.0).contains(&llm_temperature) {
        return Err(invalid(
            "REPSCOPE_LLM_TEMPERATURE",
            format!("{llm_temperature} is outside 0.0..=2.0"),
        ));
    }
    let llm_max_tokens = parse_u32("REPSCOPE_LLM_MAX_TOKENS", "2000")?;

    let newsapi_key = optional("NEWSAPI_KEY");
    let gnews_api_key = optional("GNEWS_API_KEY");
    let news_timeout_secs = parse_u64("REPSCOPE_NEWS_TIMEOUT_SECS", "15")?;
    let news_page_size = parse_u32("REPSCOPE_NEWS_PAGE_SIZE", "20")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        llm_base_url,
        llm_api_key,
        llm_model,
        llm_timeout_secs,
        llm_temperature,
        llm_max_tokens,
        newsapi_key,
        gnews_api_key,
        news_timeout_secs,
        news_page_size,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "REPSCOPE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
