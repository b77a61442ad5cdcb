//! # Route Modules
//!
//! Each submodule exposes a `router()` merged into the application in
//! [`crate::app`].

pub mod dashboard;
