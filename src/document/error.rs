//! Session error types
//!
//! Only opening a document is fatal. Every other operation on an absent
//! handle falls back to a placeholder value instead of an error, and
//! render faults are logged and swallowed. The variants here keep the
//! fatal open reasons distinguishable from each other.

use thiserror::Error;

use crate::engine::EngineError;

/// Failure to open a document.
#[derive(Debug, Clone, Error)]
pub enum OpenError {
    /// The source is not a PDF document.
    #[error("not a valid PDF document")]
    BadFormat,

    /// The document is password protected and no password was supplied.
    #[error("document requires a password")]
    PasswordRequired,

    /// The supplied password does not match.
    #[error("incorrect password")]
    WrongPassword,

    /// The document structure is corrupt.
    #[error("document structure is corrupt: {0}")]
    Corrupt(String),

    /// The engine faulted while parsing.
    #[error("engine fault while opening: {0}")]
    Engine(String),
}

impl From<EngineError> for OpenError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::BadFormat => OpenError::BadFormat,
            EngineError::PasswordRequired => OpenError::PasswordRequired,
            EngineError::WrongPassword => OpenError::WrongPassword,
            EngineError::Corrupt(detail) => OpenError::Corrupt(detail),
            EngineError::Internal(detail) => OpenError::Engine(detail),
        }
    }
}

/// Result alias for session operations.
pub type Result<T> = std::result::Result<T, OpenError>;
