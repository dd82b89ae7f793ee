//! HTTP middleware for request processing.
//!
//! - [`route_policy`] - Per-route Cache-Control, access logging, rate limit flags
//! - [`tracing`] - Request spans and response logging

pub mod route_policy;
pub mod tracing;
