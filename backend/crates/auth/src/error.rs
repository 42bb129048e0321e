//! Auth Error Types
//!
//! [`AuthError`] is the gateway boundary type: everything below it returns
//! typed errors, and the presentation layer projects them to protocol
//! bitmasks. Nothing past this module leaks formatted messages or stack
//! detail to the client-facing surface.

use thiserror::Error;

use crate::protocol::{ErrorCode, LoginFlag, RegistrationFlag};

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more structural field problems, already accumulated into a
    /// registration-context code
    #[error("Validation failed: {0}")]
    Validation(ErrorCode),

    /// Credential mismatch or unknown principal - the two are deliberately
    /// indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Username uniqueness violation on create
    #[error("Username already taken")]
    UsernameTaken,

    /// Email uniqueness violation on create
    #[error("Email already in use")]
    EmailTaken,

    /// Session not found or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Project to the login context's bit table.
    ///
    /// Every failure that is not a credential mismatch collapses to the
    /// opaque internal bit.
    pub fn login_code(&self) -> ErrorCode {
        match self {
            AuthError::InvalidCredentials => ErrorCode::of(LoginFlag::InvalidCredentials),
            _ => ErrorCode::of(LoginFlag::Internal),
        }
    }

    /// Project to the registration context's bit table.
    pub fn registration_code(&self) -> ErrorCode {
        match self {
            AuthError::Validation(code) => *code,
            AuthError::UsernameTaken => ErrorCode::of(RegistrationFlag::UsernameTaken),
            AuthError::EmailTaken => ErrorCode::of(RegistrationFlag::EmailTaken),
            _ => ErrorCode::of(RegistrationFlag::Internal),
        }
    }

    /// Log with a level matching severity. Validation and credential
    /// failures are routine; internal detail stays server-side.
    pub fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_projection_is_binary() {
        assert_eq!(AuthError::InvalidCredentials.login_code().bits(), 1);
        assert_eq!(AuthError::Internal("boom".into()).login_code().bits(), 2);
        assert_eq!(AuthError::UsernameTaken.login_code().bits(), 2);
    }

    #[test]
    fn test_registration_projection() {
        assert_eq!(AuthError::UsernameTaken.registration_code().bits(), 512);
        assert_eq!(AuthError::EmailTaken.registration_code().bits(), 1024);
        assert_eq!(
            AuthError::Internal("boom".into()).registration_code().bits(),
            2048
        );

        let code = ErrorCode::from_bits(1 | 2);
        assert_eq!(AuthError::Validation(code).registration_code(), code);
    }
}
