//! In-memory implementation of [`DirectoryStore`].

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use vigil_core::error::{VigilError, VigilResult};
use vigil_core::models::{asset::Asset, sensor::Sensor, tenant::Tenant, user::User};
use vigil_core::repository::DirectoryStore;

#[derive(Default)]
struct Inner {
    tenants: HashMap<String, Tenant>,
    /// Keyed by (tenant_id, user_id) — user ids are unique per tenant.
    users: HashMap<(String, String), User>,
    assets: Vec<Asset>,
    sensors: Vec<Sensor>,
}

/// Tenant, user, and inventory records for the configuration store.
#[derive(Clone, Default)]
pub struct MemDirectoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemDirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_tenant(&self, tenant: Tenant) {
        self.inner.write().tenants.insert(tenant.id.clone(), tenant);
    }

    pub fn insert_user(&self, user: User) {
        self.inner
            .write()
            .users
            .insert((user.tenant_id.clone(), user.id.clone()), user);
    }

    /// Replace an existing user record (role or status change).
    pub fn update_user(&self, user: User) {
        self.insert_user(user);
    }

    pub fn insert_asset(&self, asset: Asset) {
        self.inner.write().assets.push(asset);
    }

    pub fn insert_sensor(&self, sensor: Sensor) {
        self.inner.write().sensors.push(sensor);
    }
}

impl DirectoryStore for MemDirectoryStore {
    async fn get_tenant(&self, id: &str) -> VigilResult<Tenant> {
        self.inner
            .read()
            .tenants
            .get(id)
            .cloned()
            .ok_or_else(|| VigilError::not_found("tenant", id))
    }

    async fn get_user(&self, tenant_id: &str, id: &str) -> VigilResult<User> {
        self.inner
            .read()
            .users
            .get(&(tenant_id.to_string(), id.to_string()))
            .cloned()
            .ok_or_else(|| VigilError::not_found("user", id))
    }

    async fn list_assets(&self, tenant_id: &str) -> VigilResult<Vec<Asset>> {
        Ok(self
            .inner
            .read()
            .assets
            .iter()
            .filter(|a| a.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn list_sensors(&self, tenant_id: &str) -> VigilResult<Vec<Sensor>> {
        Ok(self
            .inner
            .read()
            .sensors
            .iter()
            .filter(|s| s.tenant_id == tenant_id)
            .cloned()
            .collect())
    }
}
