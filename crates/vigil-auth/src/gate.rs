//! Per-operation authorization gating.
//!
//! Each exposed operation declares its requirement once, at
//! registration time. The gate resolves the declaration from a lookup
//! table on every call — nothing is inferred dynamically — and either
//! forwards with a populated request scope or short-circuits before any
//! business logic runs.

use std::collections::HashMap;

use tracing::debug;
use vigil_core::error::{VigilError, VigilResult};
use vigil_core::repository::{DirectoryStore, SessionStore};

use crate::authority::SessionAuthority;
use crate::context::RequestScope;
use crate::error::AuthError;

/// Declared authorization policy for an exposed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationRequirement {
    NoAuth,
    RequireSession,
    RequireAdmin,
}

/// Operation name → requirement table, built once at startup.
#[derive(Debug, Default)]
pub struct OperationRegistry {
    requirements: HashMap<String, OperationRequirement>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        operation: impl Into<String>,
        requirement: OperationRequirement,
    ) -> &mut Self {
        self.requirements.insert(operation.into(), requirement);
        self
    }

    pub fn requirement(&self, operation: &str) -> Option<OperationRequirement> {
        self.requirements.get(operation).copied()
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

/// Intercepts every inbound operation and enforces its declared
/// requirement before the call proceeds.
pub struct RequestGate<S, D> {
    registry: OperationRegistry,
    authority: SessionAuthority<S, D>,
}

impl<S, D> RequestGate<S, D>
where
    S: SessionStore,
    D: DirectoryStore,
{
    pub fn new(registry: OperationRegistry, authority: SessionAuthority<S, D>) -> Self {
        Self {
            registry,
            authority,
        }
    }

    /// The authority backing this gate, for explicit invalidation
    /// (logout) paths.
    pub fn authority(&self) -> &SessionAuthority<S, D> {
        &self.authority
    }

    /// Admit or reject one inbound call.
    ///
    /// On success the returned scope carries the verified context for
    /// session-gated operations, or nothing for `NoAuth` ones. The
    /// scope belongs to this request alone.
    pub async fn admit(
        &self,
        operation: &str,
        session_id: Option<&str>,
    ) -> VigilResult<RequestScope> {
        let requirement = self
            .registry
            .requirement(operation)
            .ok_or_else(|| VigilError::not_found("operation", operation))?;

        debug!(operation, ?requirement, "admitting request");

        match requirement {
            OperationRequirement::NoAuth => Ok(RequestScope::anonymous()),
            OperationRequirement::RequireSession | OperationRequirement::RequireAdmin => {
                let token = session_id.unwrap_or_default();
                if token.is_empty() {
                    return Err(AuthError::MissingToken.into());
                }
                let context = self
                    .authority
                    .verify(token, requirement == OperationRequirement::RequireAdmin)
                    .await?;
                Ok(RequestScope::attach(context))
            }
        }
    }
}
