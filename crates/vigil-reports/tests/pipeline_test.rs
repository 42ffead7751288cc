//! End-to-end pipeline tests: gate → verified scope → report planner →
//! operation result envelope.

use chrono::{Duration, Utc};
use vigil_auth::{OperationRegistry, OperationRequirement, RequestGate, SessionAuthority};
use vigil_core::OperationResult;
use vigil_core::models::asset::Asset;
use vigil_core::models::reading::SensorReading;
use vigil_core::models::sensor::Sensor;
use vigil_core::models::session::SessionRecord;
use vigil_core::models::tenant::Tenant;
use vigil_core::models::user::{User, UserRole, UserStatus};
use vigil_reports::{
    PlannerConfig, ReadingsBrowserPage, ReadingsBrowserParameters, ReadingsReportPlanner,
};
use vigil_store::{MemDirectoryStore, MemReadingsStore, MemSessionStore};

struct Pipeline {
    gate: RequestGate<MemSessionStore, MemDirectoryStore>,
    planner: ReadingsReportPlanner<MemDirectoryStore, MemReadingsStore>,
    sessions: MemSessionStore,
}

impl Pipeline {
    /// The whole request path for the report operation, envelope
    /// included — what the transport layer performs per request.
    async fn readings_page(
        &self,
        session_id: Option<&str>,
        params: &ReadingsBrowserParameters,
    ) -> OperationResult<ReadingsBrowserPage> {
        let scope = match self.gate.admit("readings.page", session_id).await {
            Ok(scope) => scope,
            Err(err) => return OperationResult::from(Err(err)),
        };
        let tenant_id = match scope.tenant_id() {
            Ok(id) => id.to_string(),
            Err(err) => return OperationResult::from(Err(err)),
        };
        OperationResult::from(self.planner.page(&tenant_id, params).await)
    }
}

fn pipeline() -> Pipeline {
    let sessions = MemSessionStore::new();
    let directory = MemDirectoryStore::new();
    let readings = MemReadingsStore::new();

    directory.insert_tenant(Tenant {
        id: "T1".into(),
        name: "Tenant One".into(),
        created_at: Utc::now(),
    });
    directory.insert_user(User {
        id: "U1".into(),
        tenant_id: "T1".into(),
        username: "alice".into(),
        email: "alice@example.com".into(),
        role: UserRole::Member,
        status: UserStatus::Active,
        created_at: Utc::now(),
    });
    directory.insert_asset(Asset {
        id: "A1".into(),
        tenant_id: "T1".into(),
        name: "Pump station".into(),
        description: "North field".into(),
    });
    directory.insert_sensor(Sensor {
        id: "S1".into(),
        tenant_id: "T1".into(),
        asset_id: "A1".into(),
        sensor_type: "temperature".into(),
        description: "Inlet".into(),
    });

    let now = Utc::now();
    sessions.insert(SessionRecord {
        id: "abc123".into(),
        tenant_id: "T1".into(),
        user_id: "U1".into(),
        is_admin: false,
        created_at: now,
        expires_at: now + Duration::hours(1),
    });

    readings.insert(SensorReading {
        tenant_id: "T1".into(),
        asset_id: "A1".into(),
        sensor_id: "S1".into(),
        metric_name: "temp_c".into(),
        time_utc: now,
        value: 21.5,
    });

    let mut registry = OperationRegistry::new();
    registry.register("readings.page", OperationRequirement::RequireSession);

    Pipeline {
        gate: RequestGate::new(
            registry,
            SessionAuthority::new(sessions.clone(), directory.clone()),
        ),
        planner: ReadingsReportPlanner::new(directory, readings, PlannerConfig::default()),
        sessions,
    }
}

#[tokio::test]
async fn authenticated_request_flows_to_a_successful_envelope() {
    let pipeline = pipeline();

    let result = pipeline
        .readings_page(Some("abc123"), &ReadingsBrowserParameters::default())
        .await;

    assert!(result.is_success);
    assert_eq!(result.error_code, 0);
    assert_eq!(result.http_status(), 200);
    let page = result.data.unwrap();
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].tenant_id, "T1");
}

#[tokio::test]
async fn missing_session_maps_to_401() {
    let pipeline = pipeline();

    let result = pipeline
        .readings_page(None, &ReadingsBrowserParameters::default())
        .await;

    assert!(!result.is_success);
    assert_eq!(result.error_code, -401);
    assert_eq!(result.http_status(), 401);
    assert!(result.data.is_none());
    assert!(!result.message.is_empty());
}

#[tokio::test]
async fn expired_session_maps_to_410() {
    let pipeline = pipeline();

    // A second record, already past its lifetime.
    let now = Utc::now();
    pipeline.sessions.insert(SessionRecord {
        id: "stale".into(),
        tenant_id: "T1".into(),
        user_id: "U1".into(),
        is_admin: false,
        created_at: now - Duration::hours(2),
        expires_at: now - Duration::hours(1),
    });

    let result = pipeline
        .readings_page(Some("stale"), &ReadingsBrowserParameters::default())
        .await;

    assert!(!result.is_success);
    assert_eq!(result.error_code, -410);
    assert_eq!(result.http_status(), 410);
}

#[tokio::test]
async fn validation_failure_maps_to_400() {
    let pipeline = pipeline();

    let params = ReadingsBrowserParameters {
        asset_ids: Some(vec!["".into()]),
        ..Default::default()
    };
    let result = pipeline.readings_page(Some("abc123"), &params).await;

    assert!(!result.is_success);
    assert_eq!(result.error_code, -400);
    assert_eq!(result.http_status(), 400);
}
