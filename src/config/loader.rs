//! Configuration loading from disk and the environment.

use std::path::Path;
use std::fs;
use crate::config::schema::{HandlerConfig, LatencyRule};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file, then apply environment overrides.
pub fn load_config(path: &Path) -> Result<HandlerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: HandlerConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;
    finish(apply_env(config, env_lookup))
}

/// Build configuration from the process environment alone.
pub fn load_from_env() -> Result<HandlerConfig, ConfigError> {
    finish(apply_env(HandlerConfig::default(), env_lookup))
}

fn finish(config: HandlerConfig) -> Result<HandlerConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Overlay recognized environment keys onto `config`.
///
/// Keys that are absent leave the existing value alone. Latency keys that are
/// present but carry no leading integer fall back to 0.
pub fn apply_env<F>(mut config: HandlerConfig, lookup: F) -> HandlerConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(region) = lookup("REGION") {
        config.region = Some(region);
    }
    if let Some(table) = lookup("TABLE_NAME") {
        config.table_name = Some(table);
    }
    if let Some(name) = lookup("AWS_LAMBDA_FUNCTION_NAME") {
        config.function_name = Some(name);
    }
    if let Some(addr) = lookup("BIND_ADDRESS") {
        config.listener.bind_address = addr;
    }
    if let Some(level) = lookup("OTEL_DIAG_LOG_LEVEL") {
        config.observability.diag_log_level = Some(level);
    }

    config.latency.post = overlay_rule(config.latency.post, &lookup, "INJECT_LATENCY_POST_PCT", "INJECT_LATENCY_POST_MS");
    config.latency.get = overlay_rule(config.latency.get, &lookup, "INJECT_LATENCY_GET_PCT", "INJECT_LATENCY_GET_MS");

    config
}

fn overlay_rule<F>(mut rule: LatencyRule, lookup: &F, pct_key: &str, ms_key: &str) -> LatencyRule
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(pct_key) {
        rule.pct = u32::try_from(clamp_non_negative(parse_env_int(&raw, 0))).unwrap_or(u32::MAX);
    }
    if let Some(raw) = lookup(ms_key) {
        rule.ms = clamp_non_negative(parse_env_int(&raw, 0));
    }
    rule
}

fn clamp_non_negative(value: i64) -> u64 {
    value.max(0) as u64
}

/// Parse the leading integer of `raw` (`" 25ms"` → 25, `"-3"` → -3).
///
/// Returns `default` when no digits lead the value.
pub fn parse_env_int(raw: &str, default: i64) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return default;
    }

    match digits[..end].parse::<i64>() {
        Ok(v) if negative => -v,
        Ok(v) => v,
        // Too many digits for i64.
        Err(_) => if negative { i64::MIN } else { i64::MAX },
    }
}
