//! In-memory implementation of [`ReadingsStore`].

use std::cmp::Ordering;
use std::sync::Arc;

use parking_lot::RwLock;
use vigil_core::error::{VigilError, VigilResult};
use vigil_core::models::reading::SensorReading;
use vigil_core::repository::{ReadingsBatch, ReadingsQuery, ReadingsStore};

/// Time-series rows held in memory.
///
/// Query results follow the stable total order required of every
/// readings collaborator: time ascending, then asset, sensor, and
/// metric as tie-breaks. The resume cursor is a decimal offset into the
/// ordered, filtered row set.
#[derive(Clone, Default)]
pub struct MemReadingsStore {
    rows: Arc<RwLock<Vec<SensorReading>>>,
}

fn reading_order(a: &SensorReading, b: &SensorReading) -> Ordering {
    a.time_utc
        .cmp(&b.time_utc)
        .then_with(|| a.asset_id.cmp(&b.asset_id))
        .then_with(|| a.sensor_id.cmp(&b.sensor_id))
        .then_with(|| a.metric_name.cmp(&b.metric_name))
}

fn matches(query: &ReadingsQuery, row: &SensorReading) -> bool {
    let asset_ok = query
        .asset_ids
        .as_ref()
        .is_none_or(|ids| ids.contains(&row.asset_id));
    let sensor_ok = query
        .sensor_ids
        .as_ref()
        .is_none_or(|ids| ids.contains(&row.sensor_id));
    let metric_ok = query
        .metric_names
        .as_ref()
        .is_none_or(|names| names.contains(&row.metric_name));
    asset_ok && sensor_ok && metric_ok
}

impl MemReadingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, reading: SensorReading) {
        self.rows.write().push(reading);
    }

    pub fn extend(&self, readings: impl IntoIterator<Item = SensorReading>) {
        self.rows.write().extend(readings);
    }
}

impl ReadingsStore for MemReadingsStore {
    async fn query(
        &self,
        tenant_id: &str,
        query: &ReadingsQuery,
        cursor: Option<&str>,
        limit: usize,
    ) -> VigilResult<ReadingsBatch> {
        let offset: usize = match cursor {
            None => 0,
            Some(raw) => raw
                .parse()
                .map_err(|_| VigilError::Unhandled("malformed readings cursor".into()))?,
        };

        let mut selected: Vec<SensorReading> = self
            .rows
            .read()
            .iter()
            .filter(|row| row.tenant_id == tenant_id && matches(query, row))
            .cloned()
            .collect();
        selected.sort_by(reading_order);

        let total = selected.len();
        let rows: Vec<SensorReading> = selected.into_iter().skip(offset).take(limit).collect();
        let consumed = offset + rows.len();
        let next_cursor = (consumed < total).then(|| consumed.to_string());

        Ok(ReadingsBatch { rows, next_cursor })
    }

    async fn metric_names(&self, tenant_id: &str) -> VigilResult<Vec<String>> {
        let mut names: Vec<String> = self
            .rows
            .read()
            .iter()
            .filter(|row| row.tenant_id == tenant_id)
            .map(|row| row.metric_name.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(tenant: &str, asset: &str, sensor: &str, metric: &str, secs: i64) -> SensorReading {
        SensorReading {
            tenant_id: tenant.into(),
            asset_id: asset.into(),
            sensor_id: sensor.into(),
            metric_name: metric.into(),
            time_utc: Utc.timestamp_opt(secs, 0).unwrap(),
            value: 1.0,
        }
    }

    #[tokio::test]
    async fn query_orders_rows_and_pages_without_overlap() {
        let store = MemReadingsStore::new();
        store.extend([
            reading("T1", "A2", "S1", "temp", 30),
            reading("T1", "A1", "S1", "temp", 10),
            reading("T1", "A1", "S2", "temp", 10),
            reading("T1", "A1", "S1", "temp", 20),
        ]);

        let q = ReadingsQuery::default();
        let first = store.query("T1", &q, None, 3).await.unwrap();
        assert_eq!(first.rows.len(), 3);
        assert_eq!(first.rows[0].sensor_id, "S1");
        assert_eq!(first.rows[1].sensor_id, "S2");

        let cursor = first.next_cursor.expect("one row left");
        let second = store.query("T1", &q, Some(&cursor), 3).await.unwrap();
        assert_eq!(second.rows.len(), 1);
        assert!(second.next_cursor.is_none());
        assert_eq!(second.rows[0].asset_id, "A2");
    }

    #[tokio::test]
    async fn query_is_scoped_to_the_tenant() {
        let store = MemReadingsStore::new();
        store.insert(reading("T1", "A1", "S1", "temp", 10));
        store.insert(reading("T2", "A9", "S9", "temp", 10));

        let batch = store
            .query("T1", &ReadingsQuery::default(), None, 10)
            .await
            .unwrap();
        assert_eq!(batch.rows.len(), 1);
        assert_eq!(batch.rows[0].tenant_id, "T1");
    }

    #[tokio::test]
    async fn metric_names_are_distinct_and_sorted() {
        let store = MemReadingsStore::new();
        store.extend([
            reading("T1", "A1", "S1", "vibration", 1),
            reading("T1", "A1", "S1", "temp", 2),
            reading("T1", "A1", "S2", "temp", 3),
            reading("T2", "A9", "S9", "pressure", 4),
        ]);

        let names = store.metric_names("T1").await.unwrap();
        assert_eq!(names, vec!["temp".to_string(), "vibration".to_string()]);
    }
}
