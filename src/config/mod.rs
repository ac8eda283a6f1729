//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (REGION, TABLE_NAME, INJECT_LATENCY_*, ...)
//!     → validation.rs (semantic checks)
//!     → HandlerConfig (validated, immutable)
//!     → read once per warm environment
//! ```
//!
//! # Design Decisions
//! - Config is constant for the lifetime of one execution environment
//! - All fields have defaults so an empty environment is a valid config
//! - Validation separates syntactic (serde, integer parsing) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigError, load_config, load_from_env};
pub use schema::HandlerConfig;
pub use schema::LatencyConfig;
pub use schema::LatencyRule;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
