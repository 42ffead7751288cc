//! Readings browser data-transfer objects.

use serde::{Deserialize, Serialize};
use vigil_core::models::reading::SensorReading;

/// One queryable sensor row, derived from inventory on every call —
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingsBrowserFilter {
    pub asset_id: String,
    pub asset_name: String,
    pub asset_description: String,
    pub sensor_id: String,
    pub sensor_type: String,
    pub sensor_description: String,
}

/// The filter vocabulary offered to the report UI: one row per sensor
/// across the tenant's assets, plus every metric name recorded for the
/// tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterVocabulary {
    pub filters: Vec<ReadingsBrowserFilter>,
    pub metric_types: Vec<String>,
}

/// Caller-supplied report query. All filter sets are optional; an
/// omitted set places no restriction on that dimension.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadingsBrowserParameters {
    pub asset_ids: Option<Vec<String>>,
    pub sensor_ids: Option<Vec<String>>,
    pub metric_types: Option<Vec<String>>,
    /// Opaque resume position from a previous page's `next_token`,
    /// round-tripped verbatim.
    pub continuation_token: Option<String>,
}

/// One page of report rows. `next_token` absent means end of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingsBrowserPage {
    pub rows: Vec<SensorReading>,
    pub next_token: Option<String>,
}

impl ReadingsBrowserPage {
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            next_token: None,
        }
    }
}
