//! # Error Types
//!
//! Errors raised while parsing core configuration values. Loading errors
//! live in `spa-data`.

use thiserror::Error;

/// An empty-selection policy name that is neither `full` nor `none`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown empty-selection policy {0:?}; expected \"full\" or \"none\"")]
pub struct PolicyParseError(pub String);
