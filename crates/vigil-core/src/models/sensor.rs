//! Sensor domain model.

use serde::{Deserialize, Serialize};

/// A measuring device mounted on an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    pub id: String,
    pub tenant_id: String,
    /// The asset this sensor is mounted on.
    pub asset_id: String,
    /// Device category (e.g., `temperature`, `vibration`).
    pub sensor_type: String,
    pub description: String,
}
