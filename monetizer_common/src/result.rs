//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `MonetizerError`, so functions can simply return `Result<T>`.
use crate::error::MonetizerError;

/// Workspace-wide `Result` alias with `MonetizerError` as the default error.
pub type Result<T, E = MonetizerError> = std::result::Result<T, E>;
