//! Collaborator trait definitions for data access abstraction.
//!
//! All operations are async and read-only — the core never writes to
//! the session, configuration, or time-series stores. Tenant-scoped
//! reads require a `tenant_id` parameter to enforce data isolation.

use std::collections::BTreeSet;

use crate::error::VigilResult;
use crate::models::{
    asset::Asset, reading::SensorReading, sensor::Sensor, session::SessionRecord, tenant::Tenant,
    user::User,
};

/// Filter set passed down to the time-series collaborator.
///
/// `None` means "no restriction on this dimension"; an empty set is
/// never passed down — the caller short-circuits to an empty result
/// instead. `BTreeSet` keeps each dimension in a canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingsQuery {
    pub asset_ids: Option<BTreeSet<String>>,
    pub sensor_ids: Option<BTreeSet<String>>,
    pub metric_names: Option<BTreeSet<String>>,
}

/// One slice of a resumable time-series read.
///
/// `next_cursor` is the collaborator's own resume position; it is
/// meaningful only to the collaborator that produced it.
#[derive(Debug, Clone)]
pub struct ReadingsBatch {
    pub rows: Vec<SensorReading>,
    pub next_cursor: Option<String>,
}

/// Durable lookup of session records by id.
pub trait SessionStore: Send + Sync {
    fn get_by_id(&self, id: &str) -> impl Future<Output = VigilResult<SessionRecord>> + Send;
}

/// Read access to the configuration store: tenant and user identity
/// plus the asset/sensor inventory.
pub trait DirectoryStore: Send + Sync {
    fn get_tenant(&self, id: &str) -> impl Future<Output = VigilResult<Tenant>> + Send;
    fn get_user(
        &self,
        tenant_id: &str,
        id: &str,
    ) -> impl Future<Output = VigilResult<User>> + Send;
    fn list_assets(&self, tenant_id: &str)
    -> impl Future<Output = VigilResult<Vec<Asset>>> + Send;
    fn list_sensors(
        &self,
        tenant_id: &str,
    ) -> impl Future<Output = VigilResult<Vec<Sensor>>> + Send;
}

/// Paginated, filtered read access to the time-series store.
///
/// Implementations must order rows by a stable total order — time
/// ascending, then asset, sensor, and metric as tie-breaks — so that
/// repeated pagination with unchanged filters is deterministic.
pub trait ReadingsStore: Send + Sync {
    fn query(
        &self,
        tenant_id: &str,
        query: &ReadingsQuery,
        cursor: Option<&str>,
        limit: usize,
    ) -> impl Future<Output = VigilResult<ReadingsBatch>> + Send;

    /// Distinct metric names ever recorded for the tenant.
    fn metric_names(
        &self,
        tenant_id: &str,
    ) -> impl Future<Output = VigilResult<Vec<String>>> + Send;
}
