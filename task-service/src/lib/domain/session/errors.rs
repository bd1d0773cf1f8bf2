use auth::JwtError;
use thiserror::Error;

/// Top-level error for login, logout and credential validation.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    // Login
    #[error("Email is not registered: {0}")]
    UnknownEmail(String),

    #[error("Password is not correct")]
    BadCredentials,

    // Validation
    #[error("bad signature")]
    BadSignature(#[source] JwtError),

    #[error("invalid session")]
    InvalidSession,

    #[error("already logged out")]
    Expired,

    // Logout
    #[error("Session not found")]
    UnknownSession,

    // Infrastructure errors
    #[error("Credential issuance failed: {0}")]
    IssuanceFailed(String),

    #[error("Password error: {0}")]
    Password(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
