//! Core error type.
//!
//! Downstream crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors produced by `route-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid mover: {0}")]
    InvalidMover(String),
}

/// Shorthand result type for `route-core`.
pub type CoreResult<T> = Result<T, CoreError>;
