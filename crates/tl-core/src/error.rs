//! Error type for `tl-core`.
//!
//! Transitions themselves are total; only configuration can be invalid.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{what} range is empty")]
    EmptyRange { what: &'static str },
}

/// Shorthand result type for `tl-core`.
pub type CoreResult<T> = Result<T, CoreError>;
