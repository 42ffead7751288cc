//! Authentication error types.

use thiserror::Error;
use vigil_core::error::VigilError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no session token supplied")]
    MissingToken,

    #[error("session not recognized")]
    UnknownSession,

    #[error("session has expired")]
    SessionExpired,

    #[error("admin role required")]
    AdminRequired,

    /// The tenant or user behind the session no longer resolves.
    #[error("session identity unavailable: {0}")]
    IdentityUnavailable(String),

    /// Accessor used on a request scope the gate never populated.
    #[error("no verified context attached to this request")]
    ContextMissing,

    #[error("session store failure: {0}")]
    Store(String),
}

impl From<AuthError> for VigilError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken
            | AuthError::UnknownSession
            | AuthError::IdentityUnavailable(_)
            | AuthError::ContextMissing => VigilError::Unauthenticated {
                reason: err.to_string(),
            },
            AuthError::SessionExpired => VigilError::Expired,
            AuthError::AdminRequired => VigilError::Forbidden {
                reason: err.to_string(),
            },
            AuthError::Store(msg) => VigilError::Unhandled(msg),
        }
    }
}
