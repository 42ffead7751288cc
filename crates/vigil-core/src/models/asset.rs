//! Asset domain model.

use serde::{Deserialize, Serialize};

/// A physical or logical installation (machine, site, vehicle) owned by
/// one tenant and carrying zero or more sensors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub description: String,
}
