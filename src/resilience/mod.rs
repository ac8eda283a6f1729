//! Resilience testing subsystem.
//!
//! # Data Flow
//! ```text
//! Handler for a route class (POST /visit, GET /visit/{id}):
//!     → latency.rs (draw r in [0, 100); sleep `ms` when r < pct)
//!     → continue to the store call
//! ```
//!
//! # Design Decisions
//! - Fault injection only: no retries, no timeouts, no control-flow changes
//! - No shared counters; concurrent invocations draw independently
//! - The random draw sits behind a trait so tests can force either branch

pub mod latency;

pub use latency::{FixedSource, LatencyInjector, PercentSource, RouteClass, SeededSource, ThreadRngSource};
