//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! IncomingRequest (method, path, headers, body)
//!     → dispatcher.rs (trace + correlation context, bound logger)
//!     → router.rs (route lookup)
//!     → handlers.rs (health / create / read, store + latency injection)
//!     → HandlerResponse, or the generic 500 on any handler failure
//! ```
//!
//! # Design Decisions
//! - Deterministic: same input always matches same route
//! - First match wins, evaluated in a fixed order
//! - Routing is total; unmatched requests become an explicit 404

pub mod dispatcher;
pub mod handlers;
pub mod router;

pub use dispatcher::Dispatcher;
pub use router::{match_route, Route};
