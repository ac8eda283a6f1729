//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HandlerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::{HandlerConfig, LatencyRule};

/// A single semantic problem in a config.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be between 0 and 100 (got {value})")]
    PercentOutOfRange { field: &'static str, value: u32 },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

pub fn validate_config(config: &HandlerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_rule("INJECT_LATENCY_POST_PCT", &config.latency.post, &mut errors);
    check_rule("INJECT_LATENCY_GET_PCT", &config.latency.get, &mut errors);

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::Empty { field: "listener.bind_address" });
    }
    if config.table_name.as_deref().is_some_and(|t| t.trim().is_empty()) {
        errors.push(ValidationError::Empty { field: "TABLE_NAME" });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn check_rule(field: &'static str, rule: &LatencyRule, errors: &mut Vec<ValidationError>) {
    if rule.pct > 100 {
        errors.push(ValidationError::PercentOutOfRange { field, value: rule.pct });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&HandlerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = HandlerConfig::default();
        config.latency.post.pct = 101;
        config.latency.get.pct = 250;
        config.table_name = Some("  ".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::PercentOutOfRange {
            field: "INJECT_LATENCY_GET_PCT",
            value: 250,
        }));
    }
}
