use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Workflow service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub service_name: String,
    pub port: u16,
    pub rust_log: String,
    /// Base URL of the chat service. Unset disables session notifications.
    pub chat_url: Option<String>,
    pub chat_timeout: Duration,
    pub chat_max_attempts: u32,
    pub chat_outbox_capacity: usize,
    /// Upper bound on `expires_in_days` accepted at the HTTP boundary.
    pub max_expiry_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            service_name: env_or("SERVICE_NAME", "recruiter-workflow"),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            chat_url: optional_env("CHAT_URL"),
            chat_timeout: Duration::from_secs(parse_nonzero(
                "CHAT_TIMEOUT_SECS",
                &env_or("CHAT_TIMEOUT_SECS", "3"),
            )?),
            chat_max_attempts: env_or("CHAT_MAX_ATTEMPTS", "3")
                .parse::<u32>()
                .context("CHAT_MAX_ATTEMPTS must be a positive integer")?,
            chat_outbox_capacity: parse_nonzero(
                "CHAT_OUTBOX_CAPACITY",
                &env_or("CHAT_OUTBOX_CAPACITY", "1024"),
            )?,
            max_expiry_days: env_or("MAX_EXPIRY_DAYS", "90")
                .parse::<i64>()
                .context("MAX_EXPIRY_DAYS must be an integer")?,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Empty values count as unset, matching how the deployment manifests blank out overrides.
fn env_or(key: &str, fallback: &str) -> String {
    optional_env(key).unwrap_or_else(|| fallback.to_string())
}

/// Parse a count that must be at least one. A zero timeout would fail every
/// chat call and a zero-capacity outbox cannot be built.
fn parse_nonzero<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr + PartialEq + Default,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = raw
        .parse::<T>()
        .with_context(|| format!("{key} must be a positive integer"))?;
    if value == T::default() {
        bail!("{key} must be greater than zero");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nonzero_accepts_positive_values() {
        assert_eq!(parse_nonzero::<u64>("CHAT_TIMEOUT_SECS", "3").unwrap(), 3);
        assert_eq!(
            parse_nonzero::<usize>("CHAT_OUTBOX_CAPACITY", "1024").unwrap(),
            1024
        );
    }

    #[test]
    fn test_parse_nonzero_rejects_zero() {
        let err = parse_nonzero::<u64>("CHAT_TIMEOUT_SECS", "0").unwrap_err();
        assert_eq!(err.to_string(), "CHAT_TIMEOUT_SECS must be greater than zero");

        let err = parse_nonzero::<usize>("CHAT_OUTBOX_CAPACITY", "0").unwrap_err();
        assert_eq!(
            err.to_string(),
            "CHAT_OUTBOX_CAPACITY must be greater than zero"
        );
    }

    #[test]
    fn test_parse_nonzero_rejects_garbage() {
        let err = parse_nonzero::<u64>("CHAT_TIMEOUT_SECS", "-1").unwrap_err();
        assert_eq!(err.to_string(), "CHAT_TIMEOUT_SECS must be a positive integer");
        assert!(parse_nonzero::<usize>("CHAT_OUTBOX_CAPACITY", "lots").is_err());
    }
}
