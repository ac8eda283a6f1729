//! Visit request handler library.
//!
//! A stateless handler invoked once per HTTP-style event: records and reads
//! visits in a key-value store and answers health checks.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod routing;
pub mod store;

pub use config::schema::HandlerConfig;
pub use http::{HandlerResponse, HttpEvent, IncomingRequest, InvocationContext, LocalServer};
pub use lifecycle::Shutdown;
pub use routing::Dispatcher;
pub use store::{MemoryStore, VisitRecord, VisitStore};
