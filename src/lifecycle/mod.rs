//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Cold start (once per execution environment):
//!     Load config → bootstrap.rs (guarded diagnostics init) → startup.rs
//!     (store client + dispatcher) → runtime.rs loop or local HTTP server
//!
//! Warm invocations:
//!     reuse the dispatcher and store client; bootstrap is skipped
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGTERM/SIGINT → broadcast → runtime loop / server stop
//! ```
//!
//! # Design Decisions
//! - Bootstrap is idempotent: an atomic flag guards the one-time setup
//! - No internal deadlines; the platform enforces invocation timeouts

pub mod bootstrap;
pub mod runtime;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
