//! Session verification and caching.

use chrono::Utc;
use dashmap::DashMap;
use tracing::{debug, info};
use vigil_core::error::{VigilError, VigilResult};
use vigil_core::models::session::SessionRecord;
use vigil_core::models::user::UserStatus;
use vigil_core::repository::{DirectoryStore, SessionStore};

use crate::context::VerifiedContext;
use crate::error::AuthError;

/// Verifies session tokens against the session store, hydrates the
/// owning identity, and caches verified session records.
///
/// The cache holds one entry per session id and is the only shared
/// mutable state in the pipeline. Entries are checked for expiry on
/// access, never swept in the background; `invalidate` removes an entry
/// unconditionally (last writer wins). Duplicate concurrent store reads
/// for the same cold id are tolerated — both writers insert the same
/// immutable record.
///
/// Tenant and user details are re-read from the directory on every
/// verification, cache hit included, so the cache only ever saves the
/// session-store round trip, never staleness of identity data.
pub struct SessionAuthority<S, D> {
    sessions: S,
    directory: D,
    cache: DashMap<String, SessionRecord>,
}

impl<S, D> SessionAuthority<S, D>
where
    S: SessionStore,
    D: DirectoryStore,
{
    pub fn new(sessions: S, directory: D) -> Self {
        Self {
            sessions,
            directory,
            cache: DashMap::new(),
        }
    }

    /// Verify a session token, optionally demanding the admin role.
    ///
    /// The admin check runs on every call against the freshly hydrated
    /// context — it is never satisfied from the cache, so a downgrade
    /// takes effect even while the base session stays cache-hit.
    pub async fn verify(
        &self,
        session_id: &str,
        require_admin: bool,
    ) -> VigilResult<VerifiedContext> {
        if session_id.is_empty() {
            return Err(AuthError::MissingToken.into());
        }

        // The map guard must not be held across an await; resolve the
        // cache lookup to an owned record first.
        let now = Utc::now();
        let cached = match self.cache.get(session_id) {
            Some(entry) if entry.is_expired(now) => {
                drop(entry);
                self.cache.remove(session_id);
                debug!(session_id, "evicted expired cache entry");
                return Err(AuthError::SessionExpired.into());
            }
            Some(entry) => {
                debug!(session_id, "session cache hit");
                Some(entry.value().clone())
            }
            None => None,
        };

        let session = match cached {
            Some(session) => session,
            None => self.load_session(session_id).await?,
        };

        let context = self.hydrate(session).await?;

        if require_admin && !context.has_admin_rights() {
            return Err(AuthError::AdminRequired.into());
        }

        Ok(context)
    }

    /// Stop trusting the cached verification of `session_id`.
    ///
    /// Idempotent; the backing store is untouched — deleting the record
    /// itself belongs to the issuance service.
    pub fn invalidate(&self, session_id: &str) {
        if self.cache.remove(session_id).is_some() {
            info!(session_id, "session verification invalidated");
        }
    }

    /// Cold path: read the record from the store and cache it.
    async fn load_session(&self, session_id: &str) -> VigilResult<SessionRecord> {
        debug!(session_id, "session cache miss");
        let session = match self.sessions.get_by_id(session_id).await {
            Ok(session) => session,
            Err(VigilError::NotFound { .. }) => {
                return Err(AuthError::UnknownSession.into());
            }
            Err(other) => return Err(AuthError::Store(other.to_string()).into()),
        };

        if session.is_expired(Utc::now()) {
            // A concurrent verify may have cached it moments before it
            // lapsed; clear that entry too.
            self.cache.remove(session_id);
            return Err(AuthError::SessionExpired.into());
        }

        self.cache.insert(session_id.to_string(), session.clone());
        Ok(session)
    }

    /// Re-read tenant and user for the session and bind them into a
    /// fresh context. Missing or deactivated identity means the session
    /// can no longer be trusted.
    async fn hydrate(&self, session: SessionRecord) -> VigilResult<VerifiedContext> {
        let tenant = match self.directory.get_tenant(&session.tenant_id).await {
            Ok(tenant) => tenant,
            Err(VigilError::NotFound { .. }) => {
                return Err(
                    AuthError::IdentityUnavailable(format!("tenant {}", session.tenant_id)).into(),
                );
            }
            Err(other) => return Err(AuthError::Store(other.to_string()).into()),
        };

        let user = match self
            .directory
            .get_user(&session.tenant_id, &session.user_id)
            .await
        {
            Ok(user) => user,
            Err(VigilError::NotFound { .. }) => {
                return Err(
                    AuthError::IdentityUnavailable(format!("user {}", session.user_id)).into(),
                );
            }
            Err(other) => return Err(AuthError::Store(other.to_string()).into()),
        };

        if user.status != UserStatus::Active {
            return Err(
                AuthError::IdentityUnavailable(format!("user {} is inactive", user.id)).into(),
            );
        }

        Ok(VerifiedContext {
            session,
            tenant,
            user,
        })
    }
}
