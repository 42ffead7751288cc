//! Request-scoped verified context.
//!
//! The context is an explicit value handed to business logic by the
//! gate — there is no ambient or thread-local channel. A scope lives
//! for exactly one request and is never shared across requests.

use vigil_core::error::VigilResult;
use vigil_core::models::{session::SessionRecord, tenant::Tenant, user::User};
use vigil_core::repository::{DirectoryStore, SessionStore};

use crate::authority::SessionAuthority;
use crate::error::AuthError;

/// A session record hydrated with the owning tenant's and user's
/// current details at verification time.
///
/// `tenant.id == session.tenant_id` and `user.id == session.user_id`
/// hold by construction; the binding is rebuilt on every verification,
/// so identity updates are visible on the next request even when the
/// session itself was a cache hit.
#[derive(Debug, Clone)]
pub struct VerifiedContext {
    pub session: SessionRecord,
    pub tenant: Tenant,
    pub user: User,
}

impl VerifiedContext {
    /// Whether this context may pass an admin-only gate.
    ///
    /// Checked against the freshly hydrated user, not the session
    /// record alone, so a role downgrade takes effect immediately.
    pub fn has_admin_rights(&self) -> bool {
        self.session.is_admin && self.user.is_admin()
    }
}

/// Per-request holder for the verified context.
///
/// Operations gated as `NoAuth` receive an anonymous scope; every
/// accessor on it fails with an authentication error. Reaching that
/// failure means business logic bypassed the gate — a wiring bug to be
/// caught by tests, not handled at runtime.
#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    context: Option<VerifiedContext>,
}

impl RequestScope {
    /// Scope for an operation that requires no authentication.
    pub fn anonymous() -> Self {
        Self { context: None }
    }

    /// Scope carrying a freshly verified context.
    pub fn attach(context: VerifiedContext) -> Self {
        Self {
            context: Some(context),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> VigilResult<&VerifiedContext> {
        self.context
            .as_ref()
            .ok_or_else(|| AuthError::ContextMissing.into())
    }

    pub fn session_id(&self) -> VigilResult<&str> {
        Ok(self.context()?.session.id.as_str())
    }

    pub fn tenant_id(&self) -> VigilResult<&str> {
        Ok(self.context()?.tenant.id.as_str())
    }

    pub fn tenant(&self) -> VigilResult<&Tenant> {
        Ok(&self.context()?.tenant)
    }

    pub fn user_id(&self) -> VigilResult<&str> {
        Ok(self.context()?.user.id.as_str())
    }

    pub fn user(&self) -> VigilResult<&User> {
        Ok(&self.context()?.user)
    }

    pub fn is_admin(&self) -> VigilResult<bool> {
        Ok(self.context()?.has_admin_rights())
    }

    /// Logout convenience: stop trusting the cached verification of the
    /// current session. The backing session record is untouched.
    pub fn invalidate_session<S, D>(&self, authority: &SessionAuthority<S, D>) -> VigilResult<()>
    where
        S: SessionStore,
        D: DirectoryStore,
    {
        authority.invalidate(self.session_id()?);
        Ok(())
    }
}
