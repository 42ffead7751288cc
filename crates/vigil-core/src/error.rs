//! Error types for the VIGIL system.

use thiserror::Error;

/// A single rejected field in a structured input.
///
/// Validation failures are aggregated — one [`VigilError::Validation`]
/// carries every violation found, rather than failing on the first.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldViolation {
    /// Path of the offending field (e.g., `asset_ids[2]`).
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum VigilError {
    /// No session, an unknown session, or a session whose identity can
    /// no longer be resolved.
    #[error("Not authenticated: {reason}")]
    Unauthenticated { reason: String },

    /// Valid session, insufficient role.
    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    /// Session past its lifetime. Distinct from [`Self::Unauthenticated`]
    /// so clients can message it differently.
    #[error("Session expired")]
    Expired,

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    /// Malformed structured input; `violations` lists every bad field.
    #[error("Validation failed: {}", format_violations(violations))]
    Validation { violations: Vec<FieldViolation> },

    /// Required input absent entirely.
    #[error("Incomplete data: {message}")]
    IncompleteData { message: String },

    /// Collaborator or infrastructure failure, wrapped with a safe
    /// message. Internal detail never crosses this boundary.
    #[error("Unhandled error: {0}")]
    Unhandled(String),
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl VigilError {
    pub fn unauthenticated(reason: impl Into<String>) -> Self {
        Self::Unauthenticated {
            reason: reason.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// The stable wire code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Unauthenticated { .. } => ErrorCode::Unauthorized,
            Self::Forbidden { .. } => ErrorCode::Forbidden,
            Self::Expired => ErrorCode::Expired,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::AlreadyExists { .. } => ErrorCode::AlreadyExists,
            Self::Validation { .. } => ErrorCode::BadRequest,
            Self::IncompleteData { .. } => ErrorCode::IncompleteData,
            Self::Unhandled(_) => ErrorCode::UnhandledException,
        }
    }
}

pub type VigilResult<T> = Result<T, VigilError>;

/// Closed, stable error-code taxonomy carried by
/// [`OperationResult`](crate::envelope::OperationResult).
///
/// The discriminants are part of the wire contract and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Ok = 0,
    IncompleteData = -406,
    NotFound = -404,
    AlreadyExists = -409,
    BadRequest = -400,
    Unauthorized = -401,
    Forbidden = -403,
    Expired = -410,
    UnhandledException = -500,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Outward HTTP status for this code. `Ok` maps to the 200 class;
    /// everything else to its 400/500-class counterpart.
    pub fn http_status(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::IncompleteData => 406,
            Self::NotFound => 404,
            Self::AlreadyExists => 409,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::Expired => 410,
            Self::UnhandledException => 500,
        }
    }
}
