//! Sensor reading domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded measurement from the time-series store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub tenant_id: String,
    pub asset_id: String,
    pub sensor_id: String,
    pub metric_name: String,
    pub time_utc: DateTime<Utc>,
    pub value: f64,
}
