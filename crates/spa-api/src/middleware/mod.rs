//! # HTTP Middleware
//!
//! Request instrumentation layered over every route.

pub mod metrics;
