//! Application error types
//!
//! Unified error handling above the domain layer. Every failure degrades to
//! local-only behaviour somewhere up the stack; nothing here is fatal.

use modchat_core::DomainError;
use serde::Serialize;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account awaiting admin approval")]
    AccountPending,

    #[error("Registration was rejected")]
    AccountRejected,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    AlreadyExists(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // Persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// The primary store is unreachable but the write landed locally;
    /// recoverable, the UI may show a "saved locally" notice.
    #[error("Saved locally; primary store unreachable")]
    SavedLocally,

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get error code for surfacing to the UI layer
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountPending => "ACCOUNT_PENDING",
            Self::AccountRejected => "ACCOUNT_REJECTED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::Conflict(_) => "CONFLICT",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::SavedLocally => "SAVED_LOCALLY",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if this error should be shown to the user as their own mistake
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::InvalidCredentials
            | Self::AccountPending
            | Self::AccountRejected
            | Self::Validation(_)
            | Self::InvalidInput(_)
            | Self::NotFound(_)
            | Self::AlreadyExists(_)
            | Self::Conflict(_) => true,
            Self::Domain(e) => e.is_validation() || e.is_conflict() || e.is_not_found(),
            _ => false,
        }
    }

    /// Check if this state is recoverable without user action
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::SavedLocally)
    }

    /// Create a not found error for a resource type
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Error payload handed to the UI layer (toast notifications and forms)
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
            details: None,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
