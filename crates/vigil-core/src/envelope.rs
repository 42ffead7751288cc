//! Uniform success/failure envelope returned to callers.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, VigilError, VigilResult};

/// Wire-level result wrapper used by every exposed operation.
///
/// Invariant: `is_success` holds exactly when `error_code` is
/// [`ErrorCode::Ok`]; every failure carries both a code and a message.
/// The constructors are the only way to build one, so the invariant
/// cannot drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub is_success: bool,
    pub error_code: i32,
    pub message: String,
    pub data: Option<T>,
}

impl<T> OperationResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            is_success: true,
            error_code: ErrorCode::Ok.as_i32(),
            message: String::new(),
            data: Some(data),
        }
    }

    pub fn fail(code: ErrorCode, message: impl Into<String>) -> Self {
        debug_assert!(code != ErrorCode::Ok, "failures must carry a non-Ok code");
        Self {
            is_success: false,
            error_code: code.as_i32(),
            message: message.into(),
            data: None,
        }
    }

    /// Outward HTTP status for this envelope.
    pub fn http_status(&self) -> u16 {
        if self.is_success {
            200
        } else {
            code_from_wire(self.error_code).http_status()
        }
    }
}

fn code_from_wire(code: i32) -> ErrorCode {
    match code {
        0 => ErrorCode::Ok,
        -406 => ErrorCode::IncompleteData,
        -404 => ErrorCode::NotFound,
        -409 => ErrorCode::AlreadyExists,
        -400 => ErrorCode::BadRequest,
        -401 => ErrorCode::Unauthorized,
        -403 => ErrorCode::Forbidden,
        -410 => ErrorCode::Expired,
        _ => ErrorCode::UnhandledException,
    }
}

impl<T> From<VigilResult<T>> for OperationResult<T> {
    fn from(result: VigilResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::fail(err.code(), err.to_string()),
        }
    }
}
