use anyhow::{Context, Result};

use crate::llm_client::ProviderEndpoints;

/// Application configuration loaded from environment variables.
/// Startup fails if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL URL. When unset the in-memory store is used.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    pub llm_timeout_secs: u64,
    pub provider_endpoints: ProviderEndpoints,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let mut provider_endpoints = ProviderEndpoints::default();
        let overrides = [
            ("OPENAI_BASE_URL", &mut provider_endpoints.openai),
            ("ANTHROPIC_BASE_URL", &mut provider_endpoints.anthropic),
            ("GEMINI_BASE_URL", &mut provider_endpoints.gemini),
            ("GROQ_BASE_URL", &mut provider_endpoints.groq),
        ];
        for (key, slot) in overrides {
            if let Some(url) = optional_env(key) {
                *slot = url;
            }
        }

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 10)?,
            port: parse_env("PORT", 8001)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            provider_endpoints,
        })
    }
}

/// A set, non-blank variable.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_default_and_invalid() {
        // Unique names so parallel tests never race on the same variable.
        std::env::remove_var("POSTSMITH_TEST_UNSET_PORT");
        assert_eq!(parse_env::<u16>("POSTSMITH_TEST_UNSET_PORT", 8001).unwrap(), 8001);

        std::env::set_var("POSTSMITH_TEST_BAD_PORT", "not-a-port");
        let err = parse_env::<u16>("POSTSMITH_TEST_BAD_PORT", 8001).unwrap_err();
        assert!(err.to_string().contains("POSTSMITH_TEST_BAD_PORT"));

        std::env::set_var("POSTSMITH_TEST_GOOD_TIMEOUT", " 30 ");
        assert_eq!(parse_env::<u64>("POSTSMITH_TEST_GOOD_TIMEOUT", 120).unwrap(), 30);
    }
}
