//! VIGIL Server — Application entry point.
//!
//! Builds the request pipeline: collaborator stores, session
//! authority, operation registry, request gate, and report planner.
//! HTTP transport is hosted by the surrounding deployment; this binary
//! owns the wiring and its lifecycle.

use tracing_subscriber::EnvFilter;
use vigil_auth::{
    AuthConfig, OperationRegistry, OperationRequirement, RequestGate, SessionAuthority,
};
use vigil_reports::{PlannerConfig, ReadingsReportPlanner};
use vigil_store::{MemDirectoryStore, MemReadingsStore, MemSessionStore};

/// The operation table, resolved once at startup.
fn operation_registry() -> OperationRegistry {
    let mut registry = OperationRegistry::new();
    registry
        .register("system.health", OperationRequirement::NoAuth)
        .register("readings.filters", OperationRequirement::RequireSession)
        .register("readings.page", OperationRequirement::RequireSession)
        .register("sessions.revoke", OperationRequirement::RequireSession)
        .register("directory.tenants", OperationRequirement::RequireAdmin);
    registry
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("vigil=info".parse().unwrap()))
        .json()
        .init();

    tracing::info!("Starting VIGIL server...");

    let auth_config = AuthConfig::default();

    let sessions = MemSessionStore::new();
    let directory = MemDirectoryStore::new();
    let readings = MemReadingsStore::new();

    let authority = SessionAuthority::new(sessions.clone(), directory.clone());
    let registry = operation_registry();
    tracing::info!(
        operations = registry.len(),
        session_header = %auth_config.session_header,
        "operation registry resolved"
    );

    let _gate = RequestGate::new(registry, authority);
    let _planner =
        ReadingsReportPlanner::new(directory.clone(), readings.clone(), PlannerConfig::default());

    tracing::info!("VIGIL pipeline ready");

    // TODO(transport): mount the gate and planner behind the HTTP layer
    // once the deployment hands over routing.

    tracing::info!("VIGIL server stopped.");
}
