//! Client for the visit API.

pub mod client;

pub use client::{ClientError, HealthStatus, Visit, VisitClient};
