//! # AppError
//!
//! Centralized error handling for the Campus Board core.
//! Every mutating operation either succeeds observably or surfaces one
//! of these variants to the caller; nothing fails silently.

use thiserror::Error;

/// The primary error type for all cb-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Post, Report)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Submission failure (e.g., missing required field)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Denylist match at the moderation gate
    #[error("moderation rejected: {0}")]
    ModerationRejected(String),

    /// Caller is not allowed to perform the operation (e.g., deleting
    /// someone else's post, admin action without credentials)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Report state machine violation (terminal states are final)
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// The external store failed or timed out. Retrying is the
    /// caller's responsibility.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

/// A specialized Result type for Campus Board logic.
pub type Result<T> = std::result::Result<T, AppError>;
