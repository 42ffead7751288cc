//! In-memory implementation of [`SessionStore`].

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use vigil_core::error::{VigilError, VigilResult};
use vigil_core::models::session::SessionRecord;
use vigil_core::repository::SessionStore;

/// Session records keyed by token. Cheap to clone; all clones share the
/// same underlying map.
#[derive(Clone, Default)]
pub struct MemSessionStore {
    records: Arc<RwLock<HashMap<String, SessionRecord>>>,
}

impl MemSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record, standing in for the external issuance flow.
    pub fn insert(&self, record: SessionRecord) {
        self.records.write().insert(record.id.clone(), record);
    }

    /// Store-level deletion, as the issuance service would perform it.
    pub fn remove(&self, id: &str) {
        self.records.write().remove(id);
    }
}

impl SessionStore for MemSessionStore {
    async fn get_by_id(&self, id: &str) -> VigilResult<SessionRecord> {
        self.records
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| VigilError::not_found("session", id))
    }
}
