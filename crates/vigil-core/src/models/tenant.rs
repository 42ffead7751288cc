//! Tenant domain model.
//!
//! Tenants provide full data isolation: every asset, sensor, and
//! reading is scoped to exactly one tenant, and all report queries are
//! implicitly filtered by tenant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    /// Human-readable company name.
    pub name: String,
    pub created_at: DateTime<Utc>,
}
