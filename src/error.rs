//! Error types shared across subsystems.
//!
//! # Design Decisions
//! - Store failures are opaque to callers; the dispatcher maps every
//!   `HandlerError` to a generic 500
//! - Malformed request bodies are not errors (recovered in the handler)
//! - Trace/correlation extraction cannot fail, so it has no error type

use thiserror::Error;

/// Failure reported by the key-value store collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("stored item could not be decoded: {0}")]
    Decode(String),
}

/// Failure raised while handling a matched route.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Internal(String),
}

/// Failure talking to the platform runtime API.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid runtime API address: {0}")]
    Address(#[from] url::ParseError),

    #[error("runtime API response missing header {0}")]
    MissingHeader(&'static str),

    #[error("response could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Flatten an error and its sources, outermost first.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> Vec<String> {
    let mut chain = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_chain_walks_sources() {
        let err = HandlerError::from(StoreError::Unavailable("connection reset".into()));
        let chain = error_chain(&err);
        assert_eq!(chain, vec![
            "store operation failed: store unavailable: connection reset".to_string(),
            "store unavailable: connection reset".to_string(),
        ]);
    }
}
