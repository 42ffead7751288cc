//! Session domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A time-bounded proof of authentication tied to exactly one tenant
/// and user.
///
/// Records are created by the external issuance flow and never mutated
/// in place; they end by explicit invalidation or natural expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Opaque unique token, immutable once issued.
    pub id: String,
    pub tenant_id: String,
    pub user_id: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    /// Always later than `created_at`.
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
