//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Platform event (runtime API) or local HTTP request (server.rs)
//!     → event.rs (HttpEvent + InvocationContext)
//!     → request.rs (IncomingRequest, lower-cased Headers)
//!     → routing::Dispatcher
//!     → response.rs (HandlerResponse → proxy response JSON or axum Response)
//! ```

pub mod event;
pub mod request;
pub mod response;
pub mod server;

pub use event::{HttpEvent, InvocationContext};
pub use request::{Headers, IncomingRequest};
pub use response::HandlerResponse;
pub use server::LocalServer;
